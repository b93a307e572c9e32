//! Orchard server entry-point.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use orchard::inbound::http::health::HealthState;
use orchard::inbound::http::session_config::{BuildMode, session_settings_from_env};
use server::{ServerSettings, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        ServerSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), settings, session).await?;
    let result = server.await;

    health_state.mark_draining();
    info!("server stopped");
    result
}
