//! Taskboard entry-point: loads settings, wires adapters and serves the API.

mod server;

use actix_web::cookie::SameSite;
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, ServerSettings, create_server};
use taskboard::inbound::http::health::HealthState;
use taskboard::outbound::persistence::{DbPool, PoolConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let key = settings.session_key().map_err(std::io::Error::other)?;
    let session_ttl = settings.session_ttl().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(key, settings.cookie_secure, SameSite::Lax, bind_addr)
        .with_session_ttl(session_ttl);
    if let Some(url) = settings.database_url.as_deref() {
        let pool = DbPool::new(PoolConfig::new(url))
            .await
            .map_err(|e| std::io::Error::other(format!("database pool: {e}")))?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "taskboard listening");
    server.await
}
