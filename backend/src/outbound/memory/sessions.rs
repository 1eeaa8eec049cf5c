//! In-memory session store.
//!
//! Sessions are keyed by the token digest so the raw bearer never sits in
//! the map. Each entry remembers when it was issued; entries older than the
//! store's TTL stop resolving and are evicted on lookup or on the next
//! `create`.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{SessionStore, SessionStoreError};
use crate::domain::{SessionToken, UserId};

/// Lifetime of a session when the caller does not choose one.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(2 * 60 * 60);

#[derive(Debug, Clone, Copy)]
struct Entry {
    user: UserId,
    issued_at: Instant,
}

#[derive(Debug)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Entry>>,
    ttl: Duration,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose sessions lapse `ttl` after they were issued.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn is_live(&self, entry: &Entry, now: Instant) -> bool {
        now.saturating_duration_since(entry.issued_at) < self.ttl
    }
}

fn poisoned() -> SessionStoreError {
    SessionStoreError::storage("session store lock poisoned")
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, user: &UserId) -> Result<SessionToken, SessionStoreError> {
        let token = SessionToken::generate();
        let now = Instant::now();
        let mut sessions = self.sessions.write().map_err(|_| poisoned())?;
        let before = sessions.len();
        sessions.retain(|_, entry| self.is_live(entry, now));
        if sessions.len() < before {
            debug!(evicted = before - sessions.len(), "expired sessions pruned");
        }
        sessions.insert(
            token.digest(),
            Entry {
                user: *user,
                issued_at: now,
            },
        );
        Ok(token)
    }

    async fn resolve(&self, token: &SessionToken) -> Result<Option<UserId>, SessionStoreError> {
        let digest = token.digest();
        let now = Instant::now();
        {
            let sessions = self.sessions.read().map_err(|_| poisoned())?;
            match sessions.get(&digest) {
                None => return Ok(None),
                Some(entry) if self.is_live(entry, now) => return Ok(Some(entry.user)),
                Some(_) => {}
            }
        }
        let mut sessions = self.sessions.write().map_err(|_| poisoned())?;
        if sessions
            .get(&digest)
            .is_some_and(|entry| !self.is_live(entry, now))
        {
            sessions.remove(&digest);
            debug!("expired session evicted");
        }
        Ok(None)
    }

    async fn revoke(&self, token: &SessionToken) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().map_err(|_| poisoned())?;
        sessions.remove(&token.digest());
        Ok(())
    }
}
