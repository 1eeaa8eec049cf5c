//! Credential checks and server-side session lifecycle.
//!
//! Failed logins are indistinguishable: an empty field, an unknown email and
//! a wrong password all yield the same `"Login failed"` error, and an
//! unknown email is still verified against a decoy digest so the hashing
//! cost is paid either way. Logging in over an existing session retires
//! the old token.

use std::sync::Arc;

use tracing::{info, warn};
use zeroize::Zeroizing;

use super::notice::LOGIN_FAILED;
use super::ports::{PasswordHasher, SessionStore, UserRepository, verify_password};
use super::{EmailAddress, Error, LoginCredentials, PasswordHash, SessionToken, UserId};

const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Authenticates users and manages their sessions.
#[derive(Clone)]
pub struct SessionManager {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionStore>,
    hasher: Arc<dyn PasswordHasher>,
    decoy: PasswordHash,
}

impl SessionManager {
    /// Build the manager. Hashing the decoy digest can fail, hence `Result`.
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionStore>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Result<Self, Error> {
        let decoy = hasher.hash(DECOY_PASSWORD)?;
        Ok(Self {
            users,
            sessions,
            hasher,
            decoy,
        })
    }

    /// Check credentials and return the matching user.
    pub async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.is_incomplete() {
            warn!("login rejected: incomplete credentials");
            return Err(Error::unauthorized(LOGIN_FAILED));
        }

        let stored = match EmailAddress::new(credentials.email()) {
            Ok(email) => self.users.find_by_email(&email).await?,
            Err(_) => None,
        };
        let digest = stored
            .as_ref()
            .map_or(&self.decoy, |user| user.password_hash())
            .clone();
        let plaintext = Zeroizing::new(credentials.password().to_owned());
        let verified = verify_password(&self.hasher, plaintext, digest).await?;

        match stored {
            Some(user) if verified => Ok(*user.id()),
            _ => {
                warn!("login rejected: credentials did not match");
                Err(Error::unauthorized(LOGIN_FAILED))
            }
        }
    }

    /// Authenticate and open a session. `previous` is the token the client
    /// already holds, if any; it is revoked once the credentials check out.
    pub async fn login(
        &self,
        credentials: &LoginCredentials,
        previous: Option<&SessionToken>,
    ) -> Result<(UserId, SessionToken), Error> {
        let user_id = self.authenticate(credentials).await?;
        if let Some(previous) = previous {
            self.sessions.revoke(previous).await?;
            info!(user_id = %user_id, "previous session retired");
        }
        let token = self.start_session(&user_id).await?;
        Ok((user_id, token))
    }

    /// Open a session for an already-verified user.
    pub async fn start_session(&self, user_id: &UserId) -> Result<SessionToken, Error> {
        let token = self.sessions.create(user_id).await?;
        info!(user_id = %user_id, "session started");
        Ok(token)
    }

    /// Resolve the identity behind `token`. No token or an unknown token
    /// means anonymous.
    pub async fn current_identity(
        &self,
        token: Option<&SessionToken>,
    ) -> Result<Option<UserId>, Error> {
        match token {
            Some(token) => Ok(self.sessions.resolve(token).await?),
            None => Ok(None),
        }
    }

    /// End the session behind `token`. Safe to call more than once.
    pub async fn end_session(&self, token: Option<&SessionToken>) -> Result<(), Error> {
        if let Some(token) = token {
            self.sessions.revoke(token).await?;
            info!("session ended");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_manager_tests.rs"]
mod tests;
