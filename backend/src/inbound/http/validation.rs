//! Shared validation helpers for inbound HTTP adapters.
//!
//! Domain validation errors become `invalid_request` with the offending
//! field and a stable code under `details`.

use serde_json::json;

use crate::domain::{CommentValidationError, Error, FruitValidationError, LoginValidationError};

fn invalid_field(message: impl Into<String>, field: &str, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

pub(crate) fn map_fruit_validation_error(err: FruitValidationError) -> Error {
    let code = match &err {
        FruitValidationError::Empty { field } => format!("empty_{field}"),
        FruitValidationError::TooLong { field, .. } => format!("{field}_too_long"),
    };
    invalid_field(err.to_string(), err.field(), &code)
}

pub(crate) fn map_comment_validation_error(err: CommentValidationError) -> Error {
    let (field, code) = match &err {
        CommentValidationError::EmptyNote => ("note", "empty_note"),
        CommentValidationError::NoteTooLong { .. } => ("note", "note_too_long"),
        CommentValidationError::InvalidId => ("commentId", "invalid_uuid"),
    };
    invalid_field(err.to_string(), field, code)
}

pub(crate) fn map_login_validation_error(err: LoginValidationError) -> Error {
    let (field, code) = match &err {
        LoginValidationError::EmptyUsername => ("username", "empty_username"),
        LoginValidationError::EmptyPassword => ("password", "empty_password"),
    };
    invalid_field(err.to_string(), field, code)
}

/// Reject a path segment that is not a UUID.
pub(crate) fn invalid_uuid_error(field: &str, value: &str) -> Error {
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": "invalid_uuid",
    }))
}

/// Reject a body that is neither JSON nor a URL-encoded form.
pub(crate) fn invalid_body_error() -> Error {
    Error::invalid_request("request body must be JSON or a form")
        .with_details(json!({ "code": "invalid_body" }))
}
