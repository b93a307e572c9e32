//! Driving port for fruit reads.

use async_trait::async_trait;

use crate::domain::{Caller, Error, Fruit, FruitId};

/// Which fruits a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FruitFilter {
    /// Every fruit in the store.
    All,
    /// Only fruits owned by the caller; requires a session.
    Mine,
}

/// Read-side use-cases for fruits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FruitQuery: Send + Sync {
    /// List fruits matching `filter`.
    async fn list(&self, caller: Caller, filter: FruitFilter) -> Result<Vec<Fruit>, Error>;

    /// Fetch one fruit, or `not_found`.
    async fn get(&self, id: FruitId) -> Result<Fruit, Error>;

    /// Fruits whose name matches `name` once title-cased.
    async fn find_by_name(&self, name: &str) -> Result<Vec<Fruit>, Error>;
}
