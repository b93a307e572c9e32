//! Authentication primitives: login credentials and the per-request caller.
//!
//! Inbound adapters parse raw strings into these types before talking to a
//! driving port, so services never see unvalidated identity data.

use std::fmt;

use serde_json::json;
use zeroize::Zeroizing;

use super::{Error, UserId, Username};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is non-empty and keeps caller-provided whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for roster lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Identity established by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: Username,
}

/// The identity on whose behalf a service operation runs.
///
/// Resolved from the session for every request and passed explicitly into
/// each driving port.
///
/// # Examples
/// ```
/// use orchard::domain::{Caller, ErrorCode, UserId};
///
/// let err = Caller::Anonymous.require_user().unwrap_err();
/// assert_eq!(err.code(), ErrorCode::Unauthorized);
///
/// let user = UserId::random();
/// assert_eq!(Caller::Authenticated(user).require_user().unwrap(), user);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Caller {
    /// No session, or a session whose identity failed to parse.
    #[default]
    Anonymous,
    /// A logged-in user.
    Authenticated(UserId),
}

impl Caller {
    /// The caller's identity, if logged in.
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(id) => Some(*id),
        }
    }

    /// Whether the caller is logged in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The caller's identity, or an `unauthorized`/`login_required` error.
    pub fn require_user(&self) -> Result<UserId, Error> {
        self.user_id().ok_or_else(|| {
            Error::unauthorized("login required").with_details(json!({ "code": "login_required" }))
        })
    }
}

impl From<Option<UserId>> for Caller {
    fn from(value: Option<UserId>) -> Self {
        value.map_or(Self::Anonymous, Self::Authenticated)
    }
}
