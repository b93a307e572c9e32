//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CommentCommand, FruitCommand, FruitQuery, LoginService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub fruits: Arc<dyn FruitCommand>,
    pub fruits_query: Arc<dyn FruitQuery>,
    pub comments: Arc<dyn CommentCommand>,
    pub login: Arc<dyn LoginService>,
}

impl HttpState {
    /// Bundle the driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use orchard::domain::ports::FixtureLoginService;
    /// use orchard::domain::{CommentService, FruitService};
    /// use orchard::inbound::http::state::HttpState;
    /// use orchard::outbound::memory::InMemoryFruitRepository;
    ///
    /// let repo = Arc::new(InMemoryFruitRepository::new());
    /// let fruits = Arc::new(FruitService::new(repo.clone(), Arc::new(DefaultClock)));
    /// let comments = Arc::new(CommentService::new(repo, Arc::new(DefaultClock)));
    /// let state = HttpState::new(
    ///     fruits.clone(),
    ///     fruits,
    ///     comments,
    ///     Arc::new(FixtureLoginService::default()),
    /// );
    /// let _login = state.login.clone();
    /// ```
    pub fn new(
        fruits: Arc<dyn FruitCommand>,
        fruits_query: Arc<dyn FruitQuery>,
        comments: Arc<dyn CommentCommand>,
        login: Arc<dyn LoginService>,
    ) -> Self {
        Self {
            fruits,
            fruits_query,
            comments,
            login,
        }
    }
}
