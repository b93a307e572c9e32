//! Driving port for login.
//!
//! Inbound adapters call this to turn credentials into a session identity
//! without knowing where users live.

use async_trait::async_trait;

use crate::domain::{AuthenticatedUser, Error, LoginCredentials, UserId, Username};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated identity.
    async fn authenticate(&self, credentials: &LoginCredentials)
    -> Result<AuthenticatedUser, Error>;
}

/// One account known to [`FixtureLoginService`].
#[derive(Debug, Clone, Copy)]
pub struct RosterEntry {
    pub username: &'static str,
    pub password: &'static str,
    pub user_id: &'static str,
}

const DEFAULT_ROSTER: &[RosterEntry] = &[
    RosterEntry {
        username: "alice",
        password: "password",
        user_id: "6a1f0c52-3d0e-4b4e-9d57-0d3f9f1a2b01",
    },
    RosterEntry {
        username: "bob",
        password: "password",
        user_id: "6a1f0c52-3d0e-4b4e-9d57-0d3f9f1a2b02",
    },
];

/// In-process authenticator over a static roster.
///
/// User accounts are managed elsewhere; this stands in for that system.
#[derive(Debug, Clone, Copy)]
pub struct FixtureLoginService {
    roster: &'static [RosterEntry],
}

impl FixtureLoginService {
    /// Authenticator over a custom roster.
    pub fn with_roster(roster: &'static [RosterEntry]) -> Self {
        Self { roster }
    }

    /// The accounts this authenticator accepts.
    pub fn roster(&self) -> &'static [RosterEntry] {
        self.roster
    }
}

impl Default for FixtureLoginService {
    fn default() -> Self {
        Self::with_roster(DEFAULT_ROSTER)
    }
}

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedUser, Error> {
        let entry = self
            .roster
            .iter()
            .find(|entry| {
                entry.username == credentials.username() && entry.password == credentials.password()
            })
            .ok_or_else(|| Error::unauthorized("invalid credentials"))?;

        let id = UserId::new(entry.user_id)
            .map_err(|err| Error::internal(format!("invalid roster user id: {err}")))?;
        let username = Username::new(entry.username)
            .map_err(|err| Error::internal(format!("invalid roster username: {err}")))?;
        Ok(AuthenticatedUser { id, username })
    }
}
