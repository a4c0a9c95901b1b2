// ABOUTME: Secret hashing helpers for account credentials
// ABOUTME: Wraps bcrypt with environment-aware cost selection

//! One-way hashing of account secrets.
//!
//! Secrets are stored only in irreversibly hashed form. The bcrypt cost is
//! lowered in test and development builds (cost 4 is roughly 60x faster
//! than the production default of 12).

use crate::errors::{AppError, AppResult};
use std::env;

/// Bcrypt cost used when hashing secrets
#[must_use]
pub fn bcrypt_cost() -> u32 {
    if env::var("CI").is_ok() || cfg!(debug_assertions) {
        4
    } else {
        bcrypt::DEFAULT_COST
    }
}

/// Hash a secret for storage
///
/// # Errors
///
/// Returns an error if bcrypt hashing fails
pub fn hash_secret(plain: &str) -> AppResult<String> {
    bcrypt::hash(plain, bcrypt_cost())
        .map_err(|e| AppError::internal(format!("Failed to hash secret: {e}")))
}

/// Verify a plaintext secret against a stored hash
///
/// # Errors
///
/// Returns an error if the stored hash is malformed
pub fn verify_secret(plain: &str, hash: &str) -> AppResult<bool> {
    bcrypt::verify(plain, hash)
        .map_err(|e| AppError::internal(format!("Failed to verify secret: {e}")))
}

/// Generate a random secret for one-time bootstrap credentials
#[must_use]
pub fn generate_bootstrap_secret() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let chars = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()";
    (0..24)
        .map(|_| chars[rng.gen_range(0..chars.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = hash_secret("admin123").unwrap();
        assert_ne!(hash, "admin123");
        assert!(hash.starts_with("$2"));
    }

    #[test]
    fn test_verify_round_trip() {
        let hash = hash_secret("admin123").unwrap();
        assert!(verify_secret("admin123", &hash).unwrap());
        assert!(!verify_secret("wrong-secret", &hash).unwrap());
    }

    #[test]
    fn test_bootstrap_secrets_are_unique() {
        let a = generate_bootstrap_secret();
        let b = generate_bootstrap_secret();
        assert_ne!(a, b);
        assert_eq!(a.len(), 24);
    }
}
