//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`FruitCommand`, `FruitQuery`, `CommentCommand`,
//! `LoginService`) are what inbound adapters call. The driven
//! `FruitRepository` port is what the services call into.

mod comment_command;
mod fruit_command;
mod fruit_query;
mod fruit_repository;
mod login_service;

#[cfg(test)]
pub use comment_command::MockCommentCommand;
pub use comment_command::CommentCommand;
#[cfg(test)]
pub use fruit_command::MockFruitCommand;
pub use fruit_command::FruitCommand;
#[cfg(test)]
pub use fruit_query::MockFruitQuery;
pub use fruit_query::{FruitFilter, FruitQuery};
#[cfg(test)]
pub use fruit_repository::MockFruitRepository;
pub use fruit_repository::{FruitRepository, FruitRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService, RosterEntry};
