//! Password hashing and verification (Argon2, PHC string format).

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::warn;

use crate::error::{AppError, AppResult};

/// A well-formed hash that matches no password. Login verifies against it
/// when an email lookup misses, so unknown-account and wrong-password
/// rejections take the same verification work and cannot be told apart by
/// response timing.
pub const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$IU1J7EUQH9f4+rJn7cNsDg$EyRo1JisGCcOco8Ghb7pxVF2Y7JsgYbULC3dTs2/tbs";

/// Hash a plaintext password with a fresh random salt.
///
/// The returned PHC string embeds the algorithm id, cost parameters, salt
/// and digest, so it is self-describing and stored as an opaque column.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("hash: {}", e)))?
        .to_string();
    Ok(hash)
}

/// Verify a plaintext password against a stored PHC hash string.
///
/// A stored hash that cannot be parsed is a data-integrity problem, not a
/// caller error: it is logged and the verification fails closed.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "stored password hash is malformed; rejecting login");
            return false;
        }
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_password() {
        let hash = hash_password("mypassword").unwrap();
        assert!(verify_password("mypassword", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn verify_is_case_sensitive() {
        let hash = hash_password("Sup3rSecret!").unwrap();
        assert!(verify_password("Sup3rSecret!", &hash));
        assert!(!verify_password("sup3rsecret!", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same-password").unwrap();
        let b = hash_password("same-password").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("same-password", &a));
        assert!(verify_password("same-password", &b));
    }

    #[test]
    fn dummy_hash_parses_but_matches_nothing() {
        // Must be a valid PHC string so verification runs the full Argon2
        // pass instead of bailing out on a parse error.
        assert!(PasswordHash::new(DUMMY_HASH).is_ok());
        assert!(!verify_password("", DUMMY_HASH));
        assert!(!verify_password("Sup3rSecret!", DUMMY_HASH));
    }

    #[test]
    fn malformed_stored_hash_fails_closed() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
        assert!(!verify_password("anything", "$argon2id$v=19$garbage"));
    }
}
