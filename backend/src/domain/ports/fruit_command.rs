//! Driving port for fruit mutations.
//!
//! Every operation takes the [`Caller`]; implementations decide whether the
//! caller may perform it.

use async_trait::async_trait;

use crate::domain::{Caller, Error, Fruit, FruitDraft, FruitId, FruitPatch};

/// Write-side use-cases for fruits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FruitCommand: Send + Sync {
    /// Create a fruit owned by the caller.
    async fn create(&self, caller: Caller, draft: FruitDraft) -> Result<Fruit, Error>;

    /// Apply `patch` to a fruit the caller owns, returning the stored result.
    async fn update(&self, caller: Caller, id: FruitId, patch: FruitPatch)
    -> Result<Fruit, Error>;

    /// Delete a fruit the caller owns.
    async fn delete(&self, caller: Caller, id: FruitId) -> Result<(), Error>;
}
