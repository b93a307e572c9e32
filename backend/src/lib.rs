//! Orchard: an owner-scoped fruit catalogue with embedded comments.
//!
//! Layout follows ports and adapters: `domain` holds the model, services and
//! ports; `inbound::http` drives them from Actix handlers; `outbound` holds
//! the PostgreSQL and in-memory stores.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(test)]
mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
