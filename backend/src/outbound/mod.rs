//! Driven adapters implementing the domain's repository ports.
//!
//! - [`persistence`]: PostgreSQL through Diesel, comments stored as JSONB.
//! - [`memory`]: in-process store for local runs and HTTP tests.

pub mod memory;
pub mod persistence;
