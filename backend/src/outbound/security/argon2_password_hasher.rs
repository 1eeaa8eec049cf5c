//! Argon2id implementation of the [`PasswordHasher`] port.
//!
//! Digests are PHC strings (`$argon2id$v=19$m=...`) with a fresh random salt
//! per hash, so they embed everything needed to verify later even if the
//! cost parameters change.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    self, PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Argon2id hasher. `Default` uses the crate's recommended cost.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// Use explicit cost parameters. Tests pass cheap ones.
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = self
            .argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        PasswordHash::new(digest.to_string())
            .map_err(|err| PasswordHashError::hashing(err.to_string()))
    }

    fn verify(&self, plaintext: &str, digest: &PasswordHash) -> Result<bool, PasswordHashError> {
        let parsed = PhcHash::new(digest.as_str())
            .map_err(|err| PasswordHashError::malformed_digest(err.to_string()))?;
        match self.argon2().verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::malformed_digest(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        let params = Params::new(8, 1, 1, None).expect("cheap params");
        Argon2PasswordHasher::with_params(params)
    }

    #[rstest]
    fn hashes_verify_against_their_plaintext(hasher: Argon2PasswordHasher) {
        let digest = hasher.hash("secret").expect("hash");
        assert!(digest.as_str().starts_with("$argon2id$"));
        assert!(hasher.verify("secret", &digest).expect("verify"));
        assert!(!hasher.verify("Secret", &digest).expect("verify"));
    }

    #[rstest]
    fn salts_differ_between_hashes(hasher: Argon2PasswordHasher) {
        let first = hasher.hash("secret").expect("hash");
        let second = hasher.hash("secret").expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    fn malformed_digests_are_errors(hasher: Argon2PasswordHasher) {
        let digest = PasswordHash::new("not-a-phc-string").expect("non-empty");
        let err = hasher.verify("secret", &digest).expect_err("malformed");
        assert!(matches!(err, PasswordHashError::MalformedDigest { .. }));
    }
}
