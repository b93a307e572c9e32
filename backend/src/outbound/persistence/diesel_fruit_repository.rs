//! PostgreSQL-backed `FruitRepository` implementation using Diesel ORM.
//!
//! Each fruit is one row; its comments are serialized into the `comments`
//! JSONB column so a comment change is a single revision-checked update.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{FruitRepository, FruitRepositoryError};
use crate::domain::{Comment, Fruit, FruitId, UserId};

use super::models::{FruitRow, FruitUpdate, NewFruitRow};
use super::pool::{DbPool, PoolError};
use super::schema::fruits;

/// Diesel-backed implementation of the [`FruitRepository`] port.
#[derive(Clone)]
pub struct DieselFruitRepository {
    pool: DbPool,
}

impl DieselFruitRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FruitRepositoryError {
    FruitRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> FruitRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            FruitRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            FruitRepositoryError::query("fruit id already exists")
        }
        DieselError::QueryBuilderError(_) => FruitRepositoryError::query("database query error"),
        _ => FruitRepositoryError::query("database error"),
    }
}

#[expect(
    clippy::cast_sign_loss,
    reason = "revision is constrained positive in the database"
)]
fn cast_revision(revision: i32) -> u32 {
    revision as u32
}

#[expect(
    clippy::cast_possible_wrap,
    reason = "revision values are small positive integers"
)]
fn cast_revision_for_db(revision: u32) -> i32 {
    revision as i32
}

fn comments_to_json(comments: &[Comment]) -> Result<serde_json::Value, FruitRepositoryError> {
    serde_json::to_value(comments)
        .map_err(|err| FruitRepositoryError::query(format!("failed to encode comments: {err}")))
}

fn row_to_fruit(row: FruitRow) -> Result<Fruit, FruitRepositoryError> {
    let comments: Vec<Comment> = serde_json::from_value(row.comments).map_err(|err| {
        FruitRepositoryError::query(format!("corrupt comments for fruit {}: {err}", row.id))
    })?;
    Ok(Fruit {
        id: FruitId::from_uuid(row.id),
        name: row.name,
        color: row.color,
        ready_to_eat: row.ready_to_eat,
        owner: row.owner_id.map(UserId::from_uuid),
        comments,
        revision: cast_revision(row.revision),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn rows_to_fruits(rows: Vec<FruitRow>) -> Result<Vec<Fruit>, FruitRepositoryError> {
    rows.into_iter().map(row_to_fruit).collect()
}

fn new_row(fruit: &Fruit) -> Result<NewFruitRow<'_>, FruitRepositoryError> {
    Ok(NewFruitRow {
        id: *fruit.id.as_uuid(),
        name: &fruit.name,
        color: &fruit.color,
        ready_to_eat: fruit.ready_to_eat,
        owner_id: fruit.owner.map(|owner| *owner.as_uuid()),
        comments: comments_to_json(&fruit.comments)?,
        revision: cast_revision_for_db(fruit.revision),
        created_at: fruit.created_at,
        updated_at: fruit.updated_at,
    })
}

/// Explain why a revision-checked write touched zero rows.
async fn zero_rows_error(
    conn: &mut AsyncPgConnection,
    id: Uuid,
    expected_revision: u32,
) -> FruitRepositoryError {
    let current = fruits::table
        .filter(fruits::id.eq(id))
        .select(fruits::revision)
        .first::<i32>(conn)
        .await
        .optional()
        .map_err(map_diesel_error);

    match current {
        Ok(Some(actual)) => {
            FruitRepositoryError::revision_mismatch(expected_revision, cast_revision(actual))
        }
        Ok(None) => FruitRepositoryError::not_found(id.to_string()),
        Err(err) => err,
    }
}

#[async_trait]
impl FruitRepository for DieselFruitRepository {
    async fn find_by_id(&self, id: &FruitId) -> Result<Option<Fruit>, FruitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<FruitRow> = fruits::table
            .filter(fruits::id.eq(id.as_uuid()))
            .select(FruitRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_fruit).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Fruit>, FruitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<FruitRow> = fruits::table
            .select(FruitRow::as_select())
            .order_by((fruits::created_at.asc(), fruits::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_fruits(rows)
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Fruit>, FruitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<FruitRow> = fruits::table
            .filter(fruits::owner_id.eq(owner.as_uuid()))
            .select(FruitRow::as_select())
            .order_by((fruits::created_at.asc(), fruits::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_fruits(rows)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Fruit>, FruitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<FruitRow> = fruits::table
            .filter(fruits::name.eq(name))
            .select(FruitRow::as_select())
            .order_by((fruits::created_at.asc(), fruits::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_fruits(rows)
    }

    async fn insert(&self, fruit: &Fruit) -> Result<(), FruitRepositoryError> {
        let row = new_row(fruit)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(fruits::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn save(
        &self,
        fruit: &Fruit,
        expected_revision: u32,
    ) -> Result<(), FruitRepositoryError> {
        let update = FruitUpdate {
            name: &fruit.name,
            color: &fruit.color,
            ready_to_eat: fruit.ready_to_eat,
            comments: comments_to_json(&fruit.comments)?,
            revision: cast_revision_for_db(fruit.revision),
            updated_at: fruit.updated_at,
        };
        let id = *fruit.id.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated_rows = diesel::update(fruits::table)
            .filter(
                fruits::id
                    .eq(id)
                    .and(fruits::revision.eq(cast_revision_for_db(expected_revision))),
            )
            .set(&update)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated_rows == 0 {
            return Err(zero_rows_error(&mut conn, id, expected_revision).await);
        }
        Ok(())
    }

    async fn delete(
        &self,
        id: &FruitId,
        expected_revision: u32,
    ) -> Result<(), FruitRepositoryError> {
        let id = *id.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted_rows = diesel::delete(
            fruits::table.filter(
                fruits::id
                    .eq(id)
                    .and(fruits::revision.eq(cast_revision_for_db(expected_revision))),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        if deleted_rows == 0 {
            return Err(zero_rows_error(&mut conn, id, expected_revision).await);
        }
        Ok(())
    }

    async fn replace_all(&self, seed: &[Fruit]) -> Result<usize, FruitRepositoryError> {
        let rows = seed.iter().map(new_row).collect::<Result<Vec<_>, _>>()?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                diesel::delete(fruits::table).execute(conn).await?;
                diesel::insert_into(fruits::table)
                    .values(&rows)
                    .execute(conn)
                    .await
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
