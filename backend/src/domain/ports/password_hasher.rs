//! Port abstraction for password hashing.
//!
//! Hashing is CPU-bound and synchronous. Implementations must use a salted,
//! slow algorithm and must never log or retain the plaintext. Async callers
//! go through [`hash_password`] and [`verify_password`], which move the work
//! onto Tokio's blocking pool.

use std::sync::Arc;

use tokio::task;
use zeroize::Zeroizing;

use crate::domain::{Error, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashers.
    pub enum PasswordHashError {
        /// Hashing a new password failed.
        Hashing { message: String } => "password hashing failed: {message}",
        /// A stored digest could not be parsed.
        MalformedDigest { message: String } => "stored password digest is malformed: {message}",
    }
}

impl From<PasswordHashError> for Error {
    fn from(error: PasswordHashError) -> Self {
        Self::internal(error.to_string())
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted digest of `plaintext`.
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Check `plaintext` against `digest`. A mismatch is `Ok(false)`.
    fn verify(&self, plaintext: &str, digest: &PasswordHash) -> Result<bool, PasswordHashError>;
}

fn join_failed(err: task::JoinError) -> Error {
    Error::internal(format!("password hashing task failed: {err}"))
}

/// Hash `plaintext` on the blocking pool.
pub async fn hash_password(
    hasher: &Arc<dyn PasswordHasher>,
    plaintext: Zeroizing<String>,
) -> Result<PasswordHash, Error> {
    let hasher = Arc::clone(hasher);
    let digest = task::spawn_blocking(move || hasher.hash(plaintext.as_str()))
        .await
        .map_err(join_failed)??;
    Ok(digest)
}

/// Verify `plaintext` against `digest` on the blocking pool.
pub async fn verify_password(
    hasher: &Arc<dyn PasswordHasher>,
    plaintext: Zeroizing<String>,
    digest: PasswordHash,
) -> Result<bool, Error> {
    let hasher = Arc::clone(hasher);
    let verified = task::spawn_blocking(move || hasher.verify(plaintext.as_str(), &digest))
        .await
        .map_err(join_failed)??;
    Ok(verified)
}
