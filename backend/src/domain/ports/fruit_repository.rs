//! Port for fruit document persistence.
//!
//! A fruit is stored as a single document: its comments travel with it, so
//! every comment mutation is a write of the parent fruit.

use async_trait::async_trait;

use crate::domain::{Fruit, FruitId, UserId};

/// Errors raised by fruit repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FruitRepositoryError {
    /// The store could not be reached.
    #[error("fruit repository connection failed: {message}")]
    Connection { message: String },
    /// A query or mutation failed while executing.
    #[error("fruit repository query failed: {message}")]
    Query { message: String },
    /// The stored revision moved on since the caller read it.
    #[error("revision mismatch: expected {expected}, found {actual}")]
    RevisionMismatch { expected: u32, actual: u32 },
    /// The fruit vanished between read and write.
    #[error("fruit not found: {fruit_id}")]
    NotFound { fruit_id: String },
}

impl FruitRepositoryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    pub fn revision_mismatch(expected: u32, actual: u32) -> Self {
        Self::RevisionMismatch { expected, actual }
    }

    pub fn not_found(fruit_id: impl Into<String>) -> Self {
        Self::NotFound {
            fruit_id: fruit_id.into(),
        }
    }
}

/// Port for fruit storage and retrieval.
///
/// # Revision Semantics
///
/// - New fruits are inserted at revision 1.
/// - The caller advances `fruit.revision` before calling [`save`] and passes
///   the revision it originally read as `expected_revision`.
/// - [`save`] and [`delete`] fail with
///   [`FruitRepositoryError::RevisionMismatch`] when the stored revision
///   differs, and with [`FruitRepositoryError::NotFound`] when the row is gone.
///
/// [`save`]: FruitRepository::save
/// [`delete`]: FruitRepository::delete
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FruitRepository: Send + Sync {
    /// Fetch a fruit by id.
    async fn find_by_id(&self, id: &FruitId) -> Result<Option<Fruit>, FruitRepositoryError>;

    /// Every fruit, oldest first.
    async fn list_all(&self) -> Result<Vec<Fruit>, FruitRepositoryError>;

    /// Fruits whose owner is `owner`, oldest first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Fruit>, FruitRepositoryError>;

    /// Fruits whose name equals `name` exactly, oldest first.
    async fn find_by_name(&self, name: &str) -> Result<Vec<Fruit>, FruitRepositoryError>;

    /// Insert a new fruit.
    async fn insert(&self, fruit: &Fruit) -> Result<(), FruitRepositoryError>;

    /// Replace a stored fruit when its revision still equals `expected_revision`.
    async fn save(&self, fruit: &Fruit, expected_revision: u32)
    -> Result<(), FruitRepositoryError>;

    /// Delete a fruit when its revision still equals `expected_revision`.
    async fn delete(&self, id: &FruitId, expected_revision: u32)
    -> Result<(), FruitRepositoryError>;

    /// Drop every fruit and insert `fruits`, returning how many were written.
    async fn replace_all(&self, fruits: &[Fruit]) -> Result<usize, FruitRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revision_mismatch_error_formats_correctly() {
        let error = FruitRepositoryError::revision_mismatch(2_u32, 5_u32);
        assert_eq!(error.to_string(), "revision mismatch: expected 2, found 5");
    }

    #[test]
    fn not_found_error_formats_correctly() {
        let error = FruitRepositoryError::not_found("abc");
        assert_eq!(error.to_string(), "fruit not found: abc");
    }
}
