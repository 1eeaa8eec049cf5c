//! Authentication primitives: login credentials and session tokens.
//!
//! Credentials are deliberately permissive at construction time. Blank
//! values are rejected by the session manager with the same generic failure
//! as a wrong password so callers cannot tell which half was wrong.

use std::fmt;

use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Raw login form values.
///
/// # Examples
/// ```
/// use taskboard::domain::LoginCredentials;
///
/// let creds = LoginCredentials::new(" Ada@Example.com ", "secret");
/// assert_eq!(creds.email(), "Ada@Example.com");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Capture login inputs. The email is trimmed; the password is kept as
    /// typed.
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_owned(),
            password: Zeroizing::new(password.to_owned()),
        }
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Whether either field is empty.
    pub fn is_incomplete(&self) -> bool {
        self.email.is_empty() || self.password.is_empty()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &"..")
            .field("password", &"..")
            .finish()
    }
}

/// Raised when a session token string is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("session token must be {expected} lowercase hex characters")]
pub struct SessionTokenError {
    pub expected: usize,
}

const TOKEN_BYTES: usize = 32;

/// Opaque bearer for a server-side session.
///
/// Tokens are 256 random bits rendered as lowercase hex. Stores key sessions
/// by [`SessionToken::digest`] rather than the token itself.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Draw a fresh token from the operating system RNG.
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new([0_u8; TOKEN_BYTES]);
        rand::rngs::OsRng.fill_bytes(&mut *bytes);
        Self(hex::encode(&*bytes))
    }

    /// Parse a token previously issued by [`SessionToken::generate`].
    pub fn parse(raw: &str) -> Result<Self, SessionTokenError> {
        let well_formed = raw.len() == TOKEN_BYTES * 2
            && raw
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !well_formed {
            return Err(SessionTokenError {
                expected: TOKEN_BYTES * 2,
            });
        }
        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// SHA-256 of the token, hex encoded.
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(self.0.as_bytes()))
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}
