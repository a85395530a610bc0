//! Password hashing and verification using bcrypt

use crate::core::error::{RegistryError, Result};
use tokio::task;

/// Hash a password using bcrypt with the given cost factor
pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    bcrypt::hash(password, cost)
        .map_err(|e| RegistryError::CryptoError(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a hash
///
/// A malformed hash is an error rather than a mismatch.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    bcrypt::verify(password, hash)
        .map_err(|e| RegistryError::CryptoError(format!("Failed to verify password: {}", e)))
}

/// [`hash_password`] on the blocking pool
pub async fn hash_password_async(password: String, cost: u32) -> Result<String> {
    task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| RegistryError::TaskError(format!("Hashing task panicked: {}", e)))?
}

/// [`verify_password`] on the blocking pool
pub async fn verify_password_async(password: String, hash: String) -> Result<bool> {
    task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| RegistryError::TaskError(format!("Verification task panicked: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TEST_COST: u32 = crate::core::config::MIN_BCRYPT_COST;

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = hash_password("p", TEST_COST).unwrap();
        assert_ne!(hash, "p");
        assert!(hash.starts_with("$2"));
    }

    #[test]
    fn test_hash_is_salted() {
        let first = hash_password("secret", TEST_COST).unwrap();
        let second = hash_password("secret", TEST_COST).unwrap();
        assert_ne!(first, second);
        assert!(verify_password("secret", &first).unwrap());
        assert!(verify_password("secret", &second).unwrap());
    }

    #[test]
    fn test_wrong_password() {
        let hash = hash_password("secret", TEST_COST).unwrap();
        assert!(!verify_password("Secret", &hash).unwrap());
        assert!(!verify_password("", &hash).unwrap());
    }

    #[test]
    fn test_cost_is_encoded() {
        let hash = hash_password("secret", 10).unwrap();
        assert!(hash.contains("$10$"));
    }

    #[test]
    fn test_malformed_hash_is_error() {
        let result = verify_password("secret", "plaintext-secret");
        assert!(matches!(result, Err(RegistryError::CryptoError(_))));
    }

    #[tokio::test]
    async fn test_async_wrappers() {
        let hash = hash_password_async("secret".into(), TEST_COST).await.unwrap();
        assert!(verify_password_async("secret".into(), hash.clone()).await.unwrap());
        assert!(!verify_password_async("other".into(), hash).await.unwrap());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_verify_accepts_only_hashed_password(password in "[ -~]{0,32}", other in "[ -~]{0,32}") {
            let hash = hash_password(&password, TEST_COST).unwrap();
            prop_assert!(verify_password(&password, &hash).unwrap());
            prop_assert_eq!(verify_password(&other, &hash).unwrap(), other == password);
        }
    }
}
