//! bb8 pool of async Diesel connections for the fruit store.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

const DEFAULT_MAX_SIZE: u32 = 10;
const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);

/// A connection borrowed from [`DbPool`].
pub type PooledPgConnection<'a> = PooledConnection<'a, AsyncPgConnection>;

/// Pool construction or checkout failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("failed to build connection pool: {0}")]
    Build(String),
    #[error("failed to get connection from pool: {0}")]
    Checkout(String),
}

impl PoolError {
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout(message.into())
    }

    /// The underlying failure message without the prefix.
    pub fn into_message(self) -> String {
        match self {
            Self::Build(message) | Self::Checkout(message) => message,
        }
    }
}

/// Where the pool connects and how many connections it may hold.
///
/// Checkouts give up after five seconds.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
}

impl PoolConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_MAX_SIZE,
        }
    }

    pub fn with_max_size(self, max_size: u32) -> Self {
        Self { max_size, ..self }
    }
}

/// Shared handle to the pool; clones are cheap.
#[derive(Clone)]
pub struct DbPool(Pool<AsyncPgConnection>);

impl DbPool {
    /// Connect the pool, failing with [`PoolError::Build`] when the first
    /// connections cannot be opened.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let PoolConfig {
            database_url,
            max_size,
        } = config;
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
        Pool::builder()
            .max_size(max_size)
            .connection_timeout(DEFAULT_CHECKOUT_TIMEOUT)
            .build(manager)
            .await
            .map(Self)
            .map_err(|err| PoolError::Build(err.to_string()))
    }

    pub async fn get(&self) -> Result<PooledPgConnection<'_>, PoolError> {
        self.0
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}
