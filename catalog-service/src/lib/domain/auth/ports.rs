use async_trait::async_trait;
use serde::Serialize;

use crate::domain::auth::errors::AuthError;

/// Bearer token handed out on login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: &'static str,
}

impl AccessToken {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer",
        }
    }
}

/// Port for the login flow.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Exchange credentials for a bearer token whose subject is the username.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Credentials rejected, for whatever reason
    /// * `Token` - Signing failed
    /// * `User` - Lookup failed in the store
    async fn login(&self, username: &str, password: &str) -> Result<AccessToken, AuthError>;
}
