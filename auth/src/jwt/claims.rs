use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity token payload.
///
/// Only the subject and the validity window are carried. Tokens are never
/// mutated after issuance; they simply stop verifying once `exp` has passed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (the username the token was issued to)
    pub sub: String,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

impl Claims {
    /// Claims for `subject`, valid from now for `ttl`.
    pub fn for_subject(subject: impl ToString, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// True once `current_timestamp` is strictly past the expiry.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp > self.exp
    }
}
