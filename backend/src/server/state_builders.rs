//! Store selection and the services layered over it.

use std::io;
use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use orchard::domain::ports::{FixtureLoginService, FruitRepository};
use orchard::domain::{CommentService, FruitService, seed_starter_fruits};
use orchard::inbound::http::state::HttpState;
use orchard::outbound::memory::InMemoryFruitRepository;
use orchard::outbound::persistence::{DbPool, DieselFruitRepository, PoolConfig, run_migrations};

use super::ServerSettings;

/// The fruit store the server runs against.
#[derive(Clone)]
pub(crate) enum FruitStore {
    Memory(Arc<InMemoryFruitRepository>),
    Postgres(Arc<DieselFruitRepository>),
}

impl FruitStore {
    /// PostgreSQL when a database URL is configured, otherwise in-memory.
    ///
    /// Migrations run on a blocking thread before the pool is opened.
    pub(crate) async fn open(settings: &ServerSettings) -> io::Result<Self> {
        let Some(url) = settings.database_url() else {
            info!("no database configured; fruits live in memory");
            return Ok(Self::Memory(Arc::new(InMemoryFruitRepository::new())));
        };

        let migration_url = url.to_owned();
        tokio::task::spawn_blocking(move || run_migrations(&migration_url))
            .await
            .map_err(|err| io::Error::other(format!("migration task failed: {err}")))?
            .map_err(io::Error::other)?;

        let pool = DbPool::new(PoolConfig::new(url))
            .await
            .map_err(|err| io::Error::other(err.into_message()))?;
        Ok(Self::Postgres(Arc::new(DieselFruitRepository::new(pool))))
    }

    /// Port bundle for HTTP handlers.
    pub(crate) fn http_state(&self, clock: Arc<dyn Clock>) -> HttpState {
        match self {
            Self::Memory(repo) => services_over(repo.clone(), clock),
            Self::Postgres(repo) => services_over(repo.clone(), clock),
        }
    }

    /// Replace the catalogue with the starter fruits.
    pub(crate) async fn seed(&self) -> io::Result<usize> {
        let result = match self {
            Self::Memory(repo) => seed_starter_fruits(repo.as_ref(), &DefaultClock).await,
            Self::Postgres(repo) => seed_starter_fruits(repo.as_ref(), &DefaultClock).await,
        };
        result.map_err(|err| io::Error::other(format!("seeding failed: {err}")))
    }
}

fn services_over<R>(repo: Arc<R>, clock: Arc<dyn Clock>) -> HttpState
where
    R: FruitRepository + 'static,
{
    let fruits = Arc::new(FruitService::new(repo.clone(), clock.clone()));
    let comments = Arc::new(CommentService::new(repo, clock));
    HttpState::new(
        fruits.clone(),
        fruits,
        comments,
        Arc::new(FixtureLoginService::default()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use orchard::domain::Caller;
    use orchard::domain::ports::FruitFilter;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use ortho_config::OrthoConfig;

    #[tokio::test]
    async fn seeding_the_memory_store_is_visible_through_the_ports() {
        let settings = {
            let _guard = lock_env([("ORCHARD_DATABASE_URL", None::<String>)]);
            ServerSettings::load_from_iter([OsString::from("orchard")]).expect("config")
        };
        let store = FruitStore::open(&settings).await.expect("memory store");

        let written = store.seed().await.expect("seeded");
        let state = store.http_state(Arc::new(DefaultClock));
        let fruits = state
            .fruits_query
            .list(Caller::Anonymous, FruitFilter::All)
            .await
            .expect("listed");

        assert_eq!(written, 5);
        assert_eq!(fruits.len(), 5);
        assert!(fruits.iter().all(|fruit| fruit.owner.is_none()));
    }
}
