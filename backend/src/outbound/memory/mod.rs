//! In-process `FruitRepository` used when no database URL is configured.
//!
//! Honours the same revision rules as the PostgreSQL adapter so services and
//! HTTP tests behave identically against either store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{FruitRepository, FruitRepositoryError};
use crate::domain::{Fruit, FruitId, UserId};

/// Fruits held in a map guarded by an async read-write lock.
#[derive(Debug, Default)]
pub struct InMemoryFruitRepository {
    fruits: RwLock<HashMap<FruitId, Fruit>>,
}

impl InMemoryFruitRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn collect<F>(&self, keep: F) -> Vec<Fruit>
    where
        F: Fn(&Fruit) -> bool,
    {
        let guard = self.fruits.read().await;
        let mut fruits: Vec<Fruit> = guard.values().filter(|f| keep(f)).cloned().collect();
        fruits.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
        });
        fruits
    }
}

fn check_revision(
    stored: Option<&Fruit>,
    id: &FruitId,
    expected_revision: u32,
) -> Result<(), FruitRepositoryError> {
    match stored {
        None => Err(FruitRepositoryError::not_found(id.to_string())),
        Some(current) if current.revision != expected_revision => Err(
            FruitRepositoryError::revision_mismatch(expected_revision, current.revision),
        ),
        Some(_) => Ok(()),
    }
}

#[async_trait]
impl FruitRepository for InMemoryFruitRepository {
    async fn find_by_id(&self, id: &FruitId) -> Result<Option<Fruit>, FruitRepositoryError> {
        Ok(self.fruits.read().await.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Fruit>, FruitRepositoryError> {
        Ok(self.collect(|_| true).await)
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Fruit>, FruitRepositoryError> {
        Ok(self.collect(|f| f.owner.as_ref() == Some(owner)).await)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Fruit>, FruitRepositoryError> {
        Ok(self.collect(|f| f.name == name).await)
    }

    async fn insert(&self, fruit: &Fruit) -> Result<(), FruitRepositoryError> {
        let mut guard = self.fruits.write().await;
        if guard.contains_key(&fruit.id) {
            return Err(FruitRepositoryError::query("fruit id already exists"));
        }
        guard.insert(fruit.id, fruit.clone());
        Ok(())
    }

    async fn save(
        &self,
        fruit: &Fruit,
        expected_revision: u32,
    ) -> Result<(), FruitRepositoryError> {
        let mut guard = self.fruits.write().await;
        check_revision(guard.get(&fruit.id), &fruit.id, expected_revision)?;
        guard.insert(fruit.id, fruit.clone());
        Ok(())
    }

    async fn delete(
        &self,
        id: &FruitId,
        expected_revision: u32,
    ) -> Result<(), FruitRepositoryError> {
        let mut guard = self.fruits.write().await;
        check_revision(guard.get(id), id, expected_revision)?;
        guard.remove(id);
        Ok(())
    }

    async fn replace_all(&self, fruits: &[Fruit]) -> Result<usize, FruitRepositoryError> {
        let mut guard = self.fruits.write().await;
        guard.clear();
        guard.extend(fruits.iter().map(|f| (f.id, f.clone())));
        Ok(guard.len())
    }
}
