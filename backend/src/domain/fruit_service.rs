//! Fruit domain services.
//!
//! Implements the fruit driving ports on top of [`FruitRepository`]. Owner
//! checks run here, after the fruit is loaded and before anything is written;
//! a success value is only returned once the repository confirms the write.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{error, info};

use crate::domain::ports::{
    FruitCommand, FruitFilter, FruitQuery, FruitRepository, FruitRepositoryError,
};
use crate::domain::{
    Caller, Error, Fruit, FruitDraft, FruitId, FruitPatch, OwnedBy, normalize_fruit_name,
};

/// Translate repository failures into domain errors.
pub(crate) fn map_repository_error(error: FruitRepositoryError) -> Error {
    match error {
        FruitRepositoryError::Connection { message } => {
            error!(%message, "fruit repository unavailable");
            Error::service_unavailable(format!("fruit repository unavailable: {message}"))
        }
        FruitRepositoryError::Query { message } => {
            error!(%message, "fruit repository query failed");
            Error::internal(format!("fruit repository error: {message}"))
        }
        FruitRepositoryError::RevisionMismatch { expected, actual } => {
            Error::conflict("fruit was modified concurrently").with_details(json!({
                "expectedRevision": expected,
                "actualRevision": actual,
                "code": "revision_mismatch",
            }))
        }
        FruitRepositoryError::NotFound { fruit_id } => fruit_not_found(&fruit_id),
    }
}

pub(crate) fn fruit_not_found(fruit_id: &dyn std::fmt::Display) -> Error {
    Error::not_found(format!("fruit {fruit_id} not found")).with_details(json!({
        "code": "fruit_not_found",
        "fruitId": fruit_id.to_string(),
    }))
}

/// Load a fruit or fail with `fruit_not_found`.
pub(crate) async fn load_fruit<R>(repo: &R, id: FruitId) -> Result<Fruit, Error>
where
    R: FruitRepository + ?Sized,
{
    repo.find_by_id(&id)
        .await
        .map_err(map_repository_error)?
        .ok_or_else(|| fruit_not_found(&id))
}

/// Fruit service implementing [`FruitCommand`] and [`FruitQuery`].
#[derive(Clone)]
pub struct FruitService<R> {
    fruit_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> FruitService<R> {
    /// Create a new service over the fruit repository.
    pub fn new(fruit_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { fruit_repo, clock }
    }
}

impl<R> FruitService<R>
where
    R: FruitRepository,
{
    async fn load_owned(&self, caller: Caller, id: FruitId) -> Result<Fruit, Error> {
        let user = caller.require_user()?;
        let fruit = load_fruit(self.fruit_repo.as_ref(), id).await?;
        if let Err(err) = fruit.check_owner(&user) {
            info!(fruit_id = %id, user_id = %user, "fruit change denied: caller is not the owner");
            return Err(err);
        }
        Ok(fruit)
    }
}

#[async_trait]
impl<R> FruitCommand for FruitService<R>
where
    R: FruitRepository,
{
    async fn create(&self, caller: Caller, draft: FruitDraft) -> Result<Fruit, Error> {
        let owner = caller.require_user()?;
        let fruit = Fruit::new(draft, Some(owner), self.clock.utc());
        self.fruit_repo
            .insert(&fruit)
            .await
            .map_err(map_repository_error)?;
        info!(fruit_id = %fruit.id, owner = %owner, "fruit created");
        Ok(fruit)
    }

    async fn update(
        &self,
        caller: Caller,
        id: FruitId,
        patch: FruitPatch,
    ) -> Result<Fruit, Error> {
        let mut fruit = self.load_owned(caller, id).await?;
        if patch.is_empty() {
            return Ok(fruit);
        }
        let expected_revision = fruit.revision;
        fruit.apply(patch, self.clock.utc());
        self.fruit_repo
            .save(&fruit, expected_revision)
            .await
            .map_err(map_repository_error)?;
        Ok(fruit)
    }

    async fn delete(&self, caller: Caller, id: FruitId) -> Result<(), Error> {
        let fruit = self.load_owned(caller, id).await?;
        self.fruit_repo
            .delete(&id, fruit.revision)
            .await
            .map_err(map_repository_error)?;
        info!(fruit_id = %id, "fruit deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> FruitQuery for FruitService<R>
where
    R: FruitRepository,
{
    async fn list(&self, caller: Caller, filter: FruitFilter) -> Result<Vec<Fruit>, Error> {
        let fruits = match filter {
            FruitFilter::All => self.fruit_repo.list_all().await,
            FruitFilter::Mine => {
                let owner = caller.require_user()?;
                self.fruit_repo.list_by_owner(&owner).await
            }
        };
        fruits.map_err(map_repository_error)
    }

    async fn get(&self, id: FruitId) -> Result<Fruit, Error> {
        load_fruit(self.fruit_repo.as_ref(), id).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Fruit>, Error> {
        let normalized = normalize_fruit_name(name);
        if normalized.is_empty() {
            return Err(Error::invalid_request("fruit name must not be empty")
                .with_details(json!({ "field": "name", "code": "empty_name" })));
        }
        self.fruit_repo
            .find_by_name(&normalized)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "fruit_service_tests.rs"]
mod tests;
