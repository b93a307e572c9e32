//! User identity primitives.
//!
//! Users are external to this service: fruits and comments only reference
//! them by [`UserId`]. Every owner or author comparison happens on this type.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors for user primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must not be empty")]
    EmptyId,
    #[error("user id must be a valid UUID")]
    InvalidId,
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("username must be at most {max} characters")]
    UsernameTooLong { max: usize },
    #[error("username may only contain letters, numbers, spaces, or underscores")]
    UsernameInvalidCharacters,
}

/// Canonical user identifier.
///
/// Session values are parsed into this type at the boundary, so owner and
/// author checks compare UUIDs rather than loosely formatted strings.
///
/// # Examples
/// ```
/// use orchard::domain::UserId;
///
/// let upper = UserId::new("3FA85F64-5717-4562-B3FC-2C963F66AFA6").unwrap();
/// let lower = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
/// assert_eq!(upper, lower);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, format = Uuid)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its textual form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 32;

/// Human readable login name shown alongside the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "alice")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let username = username.into();
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !trimmed
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == ' ')
        {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the username.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserValidationError::EmptyId)]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
    #[case("alice", UserValidationError::InvalidId)]
    fn user_id_rejects_malformed_input(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(UserId::new(raw).expect_err("must fail"), expected);
    }

    #[rstest]
    fn user_id_comparison_ignores_case() {
        let upper = UserId::new("3FA85F64-5717-4562-B3FC-2C963F66AFA6").expect("valid");
        let lower = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid");
        assert_eq!(upper, lower);
        assert_eq!(upper.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[rstest]
    fn user_id_serializes_as_string() {
        let id = UserId::random();
        let value = serde_json::to_value(id).expect("serialize");
        assert_eq!(value, serde_json::Value::String(id.to_string()));
    }

    #[rstest]
    #[case("", UserValidationError::EmptyUsername)]
    #[case("   ", UserValidationError::EmptyUsername)]
    #[case("bad!name", UserValidationError::UsernameInvalidCharacters)]
    fn username_rejects_invalid(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(Username::new(raw).expect_err("must fail"), expected);
    }

    #[rstest]
    fn username_rejects_overlong_values() {
        let raw = "a".repeat(USERNAME_MAX + 1);
        assert_eq!(
            Username::new(raw).expect_err("must fail"),
            UserValidationError::UsernameTooLong { max: USERNAME_MAX }
        );
    }

    #[rstest]
    fn username_is_trimmed() {
        let name = Username::new("  alice ").expect("valid");
        assert_eq!(name.as_str(), "alice");
    }
}
