//! Server settings loaded via OrthoConfig and the resolved server config.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroize;

use taskboard::outbound::memory::DEFAULT_SESSION_TTL;
use taskboard::outbound::persistence::DbPool;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
/// `Key::derive_from` needs at least this much master key material.
const SESSION_KEY_MIN_LEN: usize = 32;

/// Raw settings from CLI flags, `TASKBOARD_*` environment variables and the
/// configuration file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TASKBOARD")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the in-memory stores are used.
    pub database_url: Option<String>,
    /// File holding the session cookie master key.
    pub session_key_file: Option<PathBuf>,
    /// Mark the session cookie `Secure`.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// Fall back to a throwaway key when the key file cannot be read.
    #[ortho_config(default = false)]
    pub allow_ephemeral_session_key: bool,
    /// Seconds a login stays valid, both server-side and in the cookie.
    #[ortho_config(default = 7200)]
    pub session_ttl_secs: u64,
}

/// Problems turning [`ServerSettings`] into a runnable config.
#[derive(thiserror::Error, Debug)]
pub enum ServerConfigError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("session TTL must be at least one second")]
    SessionTtl,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, ServerConfigError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| ServerConfigError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    pub fn session_ttl(&self) -> Result<Duration, ServerConfigError> {
        match self.session_ttl_secs {
            0 => Err(ServerConfigError::SessionTtl),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(SESSION_KEY_DEFAULT_PATH))
    }

    /// Read the cookie master key, or generate one when allowed.
    pub fn session_key(&self) -> Result<Key, ServerConfigError> {
        let path = self.session_key_file();
        match std::fs::read(&path) {
            Ok(bytes) => key_from_bytes(&path, bytes),
            Err(error) if self.allow_ephemeral_session_key => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary session key (dev only)"
                );
                Ok(Key::generate())
            }
            Err(source) => Err(ServerConfigError::KeyRead { path, source }),
        }
    }
}

fn key_from_bytes(path: &Path, mut bytes: Vec<u8>) -> Result<Key, ServerConfigError> {
    let length = bytes.len();
    if length < SESSION_KEY_MIN_LEN {
        bytes.zeroize();
        return Err(ServerConfigError::KeyTooShort {
            path: path.to_path_buf(),
            length,
            min_len: SESSION_KEY_MIN_LEN,
        });
    }
    let key = Key::derive_from(&bytes);
    bytes.zeroize();
    Ok(key)
}

/// Resolved configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) session_ttl: Duration,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            session_ttl: DEFAULT_SESSION_TTL,
            db_pool: None,
        }
    }

    /// Lifetime of a login, applied to the session store and the cookie.
    #[must_use]
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Use the Diesel repositories backed by `pool`.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
