use thiserror::Error;

/// Error type for password operations.
///
/// Verification never fails with an error: a malformed stored hash simply
/// does not match. Only producing a new hash can fail.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
