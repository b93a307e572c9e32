//! Correlation id carried by every request and every error it produces.
//!
//! A [`TraceId`] is entered with [`TraceId::scope`] by the HTTP middleware and
//! read back by [`Error`](super::Error) constructors. Spawned tasks do not
//! inherit it.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static CURRENT: TraceId;
}

/// UUID naming one request in logs, error bodies and the `trace-id` header.
///
/// # Examples
/// ```
/// use orchard::domain::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id = TraceId::adopt_or_generate(Some("3fa85f64-5717-4562-b3fc-2c963f66afa6"));
/// let seen = id.scope(async { TraceId::current() }).await;
/// assert_eq!(seen, Some(id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Keep a client-supplied id when it is a UUID, otherwise mint one.
    #[must_use]
    pub fn adopt_or_generate(inbound: Option<&str>) -> Self {
        inbound
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_else(Self::generate)
    }

    /// The id of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with this id as the current one.
    pub async fn scope<Fut: Future>(self, fut: Fut) -> Fut::Output {
        CURRENT.scope(self, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}
