//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix cookie session so handlers deal only in [`Caller`] values
//! and the logged-in username shown on pages.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{AuthenticatedUser, Caller, Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const USERNAME_KEY: &str = "username";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Record a successful login in the session cookie.
    ///
    /// The session is renewed first so a pre-login cookie cannot be replayed.
    pub fn persist_user(&self, user: &AuthenticatedUser) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user.id.to_string())
            .and_then(|()| self.0.insert(USERNAME_KEY, user.username.as_str()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Resolve the caller for this request.
    ///
    /// A user id that fails to parse is treated as no session at all.
    pub fn caller(&self) -> Result<Caller, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        let Some(raw) = raw else {
            return Ok(Caller::Anonymous);
        };
        match UserId::new(&raw) {
            Ok(id) => Ok(Caller::Authenticated(id)),
            Err(error) => {
                tracing::warn!(%error, "invalid user id in session cookie");
                Ok(Caller::Anonymous)
            }
        }
    }

    /// Username recorded at login, if any.
    pub fn username(&self) -> Option<String> {
        self.0.get::<String>(USERNAME_KEY).ok().flatten()
    }

    /// Drop every session value and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
