//! Builders wiring port adapters into the HTTP state.

use std::sync::Arc;

use taskboard::domain::ports::{TaskRepository, UserRepository};
use taskboard::inbound::http::state::{HttpState, HttpStatePorts};
use taskboard::outbound::memory::{
    InMemorySessionStore, InMemoryTaskRepository, InMemoryUserRepository,
};
use taskboard::outbound::persistence::{DbPool, DieselTaskRepository, DieselUserRepository};
use taskboard::outbound::security::Argon2PasswordHasher;
use tracing::{info, warn};

use super::ServerConfig;

/// Diesel repositories when a pool is configured, in-memory ones otherwise.
fn build_repositories(
    pool: Option<&DbPool>,
) -> (Arc<dyn UserRepository>, Arc<dyn TaskRepository>) {
    match pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            (
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselTaskRepository::new(pool.clone())),
            )
        }
        None => {
            warn!("no database configured; records live in memory only");
            (
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryTaskRepository::new()),
            )
        }
    }
}

/// Assemble the handler state.
///
/// Sessions always live in process memory and lapse after the configured
/// TTL. A restart logs everyone out.
pub fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let (users, tasks) = build_repositories(config.db_pool.as_ref());
    HttpState::try_from_ports(HttpStatePorts {
        users,
        tasks,
        sessions: Arc::new(InMemorySessionStore::with_ttl(config.session_ttl)),
        hasher: Arc::new(Argon2PasswordHasher::default()),
    })
    .map_err(|err| std::io::Error::other(format!("failed to build HTTP state: {err}")))
}
