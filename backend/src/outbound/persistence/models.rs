//! Internal Diesel row structs for the `fruits` table.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::fruits;

/// Row read from the fruits table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = fruits)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FruitRow {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub ready_to_eat: bool,
    pub owner_id: Option<Uuid>,
    pub comments: serde_json::Value,
    pub revision: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable row for new fruits.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = fruits)]
pub(crate) struct NewFruitRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub color: &'a str,
    pub ready_to_eat: bool,
    pub owner_id: Option<Uuid>,
    pub comments: serde_json::Value,
    pub revision: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset written by a revision-checked save. Owner is never rewritten.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = fruits)]
pub(crate) struct FruitUpdate<'a> {
    pub name: &'a str,
    pub color: &'a str,
    pub ready_to_eat: bool,
    pub comments: serde_json::Value,
    pub revision: i32,
    pub updated_at: DateTime<Utc>,
}
