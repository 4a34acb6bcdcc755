//! Admin credentials as held at runtime.

use argon2::{Argon2, PasswordHash, PasswordVerifier};

#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// The argon2 hashed admin secret.
    pub secret_hash: String,
}

impl AdminConfig {
    pub fn new(secret_hash: String) -> Self {
        Self { secret_hash }
    }

    /// Whether `plaintext` matches the stored hash. A malformed hash matches
    /// nothing.
    pub fn verify_secret(&self, plaintext: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&self.secret_hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::hash_secret;

    #[test]
    fn test_verify_secret() {
        let admin = AdminConfig::new(hash_secret("open-sesame").unwrap());
        assert!(admin.verify_secret("open-sesame"));
        assert!(!admin.verify_secret("open-sesame "));
    }

    #[test]
    fn test_malformed_hash_rejects_everything() {
        let admin = AdminConfig::new("not-a-hash".to_string());
        assert!(!admin.verify_secret("not-a-hash"));
        assert!(!admin.verify_secret(""));
    }
}
