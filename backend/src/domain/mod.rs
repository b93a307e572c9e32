//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the fruit and comment model, the caller identity passed into
//! every use-case, and the services that enforce owner and author rules.
//! Nothing here knows about HTTP, cookies, or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport agnostic failure payload.
//! - Caller / UserId: the identity an operation runs as.
//! - Fruit / Comment: the stored documents.
//! - FruitService / CommentService: implementations of the driving ports.

pub mod auth;
pub mod comment;
pub mod comment_service;
pub mod error;
pub mod fruit;
pub mod fruit_service;
pub mod ownership;
pub mod ports;
pub mod seed;
pub mod trace_id;
pub mod user;

pub use self::auth::{AuthenticatedUser, Caller, LoginCredentials, LoginValidationError};
pub use self::comment::{Comment, CommentDraft, CommentId, CommentValidationError};
pub use self::comment_service::CommentService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::fruit::{
    Fruit, FruitDraft, FruitId, FruitPatch, FruitValidationError, normalize_fruit_name,
};
pub use self::fruit_service::FruitService;
pub use self::ownership::{OwnedBy, OwnershipKind};
pub use self::seed::{seed_starter_fruits, starter_fruits};
pub use self::trace_id::TraceId;
pub use self::user::{UserId, UserValidationError, Username};

