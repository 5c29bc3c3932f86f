use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::AccessToken;
use crate::domain::auth::ports::AuthServicePort;
use crate::user::ports::UserServicePort;

/// Credential verification and token issuance.
pub struct AuthService<US>
where
    US: UserServicePort + ?Sized,
{
    users: Arc<US>,
    authenticator: Arc<Authenticator>,
}

impl<US> AuthService<US>
where
    US: UserServicePort + ?Sized,
{
    pub fn new(users: Arc<US>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            users,
            authenticator,
        }
    }
}

#[async_trait]
impl<US> AuthServicePort for AuthService<US>
where
    US: UserServicePort + ?Sized,
{
    async fn login(&self, username: &str, password: &str) -> Result<AccessToken, AuthError> {
        let Some(user) = self.users.authenticate(username, password).await? else {
            tracing::warn!(username = %username, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        let token = self.authenticator.generate_token(user.username.as_str())?;

        tracing::info!(user_id = %user.id, "Login succeeded");

        Ok(AccessToken::bearer(token))
    }
}
