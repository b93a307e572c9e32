//! Driving port for comment mutations.

use async_trait::async_trait;

use crate::domain::{Caller, Comment, CommentDraft, CommentId, Error, FruitId};

/// Comment use-cases. Authorization here is independent of fruit ownership.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentCommand: Send + Sync {
    /// Append a comment authored by the caller.
    async fn add(&self, caller: Caller, fruit_id: FruitId, draft: CommentDraft)
    -> Result<Comment, Error>;

    /// Remove a comment the caller wrote.
    async fn delete(
        &self,
        caller: Caller,
        fruit_id: FruitId,
        comment_id: CommentId,
    ) -> Result<(), Error>;
}
