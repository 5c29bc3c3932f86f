use chrono::Duration;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password hashing and token issuance.
///
/// Holds the process-wide signing key and the fixed token lifetime; built once
/// at startup and shared read-only afterwards.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_ttl: Duration,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `token_ttl` - Lifetime of every issued token
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            token_ttl,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Burn one verification for an account that does not exist.
    ///
    /// Always `false`; takes as long as [`Authenticator::verify_password`].
    pub fn reject_unknown(&self, password: &str) -> bool {
        self.password_hasher.verify_decoy(password)
    }

    /// Issue a token for an identity the caller has already established.
    pub fn generate_token(&self, subject: &str) -> Result<String, JwtError> {
        self.jwt_handler.issue(subject, self.token_ttl)
    }

    /// Resolve the subject of a token; `None` when invalid or expired.
    pub fn validate_token(&self, token: &str) -> Option<String> {
        self.jwt_handler.verify(token)
    }
}
