//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs (`models.rs`) and the table definition (`schema.rs`)
//! stay private to this module.
//!
//! # Example
//!
//! ```ignore
//! use orchard::outbound::persistence::{DbPool, DieselFruitRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/orchard")).await?;
//! let repo = DieselFruitRepository::new(pool);
//! ```

mod diesel_fruit_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_fruit_repository::DieselFruitRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
