//! Port abstraction for server-side login sessions.
//!
//! The browser cookie carries only an opaque [`SessionToken`]; the store maps
//! it to the signed-in user. Revoking a token ends the session even if a
//! copy of the cookie survives.

use async_trait::async_trait;

use crate::domain::{Error, SessionToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session store adapters.
    pub enum SessionStoreError {
        /// Backing store could not be reached.
        Unavailable { message: String } => "session store unavailable: {message}",
        /// Store rejected the operation.
        Storage { message: String } => "session store failed: {message}",
    }
}

impl From<SessionStoreError> for Error {
    fn from(error: SessionStoreError) -> Self {
        match error {
            SessionStoreError::Unavailable { message } => {
                Self::service_unavailable(format!("session store unavailable: {message}"))
            }
            SessionStoreError::Storage { message } => {
                Self::internal(format!("session store error: {message}"))
            }
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Open a session for `user` and return the token identifying it.
    async fn create(&self, user: &UserId) -> Result<SessionToken, SessionStoreError>;

    /// Resolve a token to its user, or `None` when unknown or revoked.
    async fn resolve(&self, token: &SessionToken) -> Result<Option<UserId>, SessionStoreError>;

    /// Forget a token. Unknown tokens are ignored.
    async fn revoke(&self, token: &SessionToken) -> Result<(), SessionStoreError>;
}
