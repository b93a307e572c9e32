//! Comment domain service.
//!
//! Comments live inside their fruit, so both operations are a
//! read-modify-write of the parent document guarded by its revision.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::fruit_service::{load_fruit, map_repository_error};
use crate::domain::ports::{CommentCommand, FruitRepository};
use crate::domain::{Caller, Comment, CommentDraft, CommentId, Error, FruitId, OwnedBy};

fn comment_not_found(fruit_id: FruitId, comment_id: CommentId) -> Error {
    Error::not_found(format!("comment {comment_id} not found")).with_details(json!({
        "code": "comment_not_found",
        "fruitId": fruit_id.to_string(),
        "commentId": comment_id.to_string(),
    }))
}

/// Comment service implementing [`CommentCommand`].
#[derive(Clone)]
pub struct CommentService<R> {
    fruit_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> CommentService<R> {
    /// Create a new service over the fruit repository.
    pub fn new(fruit_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { fruit_repo, clock }
    }
}

#[async_trait]
impl<R> CommentCommand for CommentService<R>
where
    R: FruitRepository,
{
    async fn add(
        &self,
        caller: Caller,
        fruit_id: FruitId,
        draft: CommentDraft,
    ) -> Result<Comment, Error> {
        let author = caller.require_user()?;
        let mut fruit = load_fruit(self.fruit_repo.as_ref(), fruit_id).await?;
        let expected_revision = fruit.revision;
        let now = self.clock.utc();
        let comment = Comment::new(draft, author, now);
        fruit.push_comment(comment.clone(), now);
        self.fruit_repo
            .save(&fruit, expected_revision)
            .await
            .map_err(map_repository_error)?;
        Ok(comment)
    }

    async fn delete(
        &self,
        caller: Caller,
        fruit_id: FruitId,
        comment_id: CommentId,
    ) -> Result<(), Error> {
        let user = caller.require_user()?;
        let mut fruit = load_fruit(self.fruit_repo.as_ref(), fruit_id).await?;
        let comment = fruit
            .comment(&comment_id)
            .ok_or_else(|| comment_not_found(fruit_id, comment_id))?;
        if let Err(err) = comment.check_owner(&user) {
            info!(
                fruit_id = %fruit_id,
                comment_id = %comment_id,
                user_id = %user,
                "comment delete denied: caller is not the author"
            );
            return Err(err);
        }

        let expected_revision = fruit.revision;
        fruit.remove_comment(&comment_id, self.clock.utc());
        self.fruit_repo
            .save(&fruit, expected_revision)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "comment_service_tests.rs"]
mod tests;
