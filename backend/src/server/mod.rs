//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::ServerSettings;

use std::io;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use orchard::ApiDoc;
use orchard::Trace;
use orchard::inbound::http;
use orchard::inbound::http::health::{HealthState, live, ready};
use orchard::inbound::http::session_config::SessionSettings;
use orchard::middleware::MethodOverride;

use state_builders::FruitStore;

/// Open the store, optionally seed it, and bind the HTTP server.
///
/// Readiness flips once the listener is bound.
///
/// # Errors
/// Propagates store, seeding and socket errors.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    settings: ServerSettings,
    session: SessionSettings,
) -> io::Result<Server> {
    let store = FruitStore::open(&settings).await?;

    #[cfg(feature = "metrics")]
    let metrics = metrics::Metrics::new()?;

    if settings.seed_on_start {
        let written = store.seed().await?;
        info!(count = written, "starter fruits loaded at startup");
        #[cfg(feature = "metrics")]
        metrics.seed_runs.inc();
    }

    let http_state = web::Data::new(store.http_state(Arc::new(DefaultClock)));
    let server_health_state = health_state.clone();
    let session = Arc::new(session);

    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(server_health_state.clone())
            .app_data(http_state.clone())
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );

        let app = app
            .configure(http::configure)
            .wrap(session.middleware())
            .wrap(MethodOverride)
            .wrap(Trace);

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics.http.clone());

        app
    })
    .bind(settings.bind_addr())?
    .run();

    info!(host = settings.bind_addr().0, port = settings.bind_addr().1, "listening");
    health_state.mark_ready();
    Ok(server)
}
