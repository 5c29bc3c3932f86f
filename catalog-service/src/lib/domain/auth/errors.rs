use thiserror::Error;

use crate::user::errors::UserError;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username, wrong password or inactive account.
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Token generation failed: {0}")]
    Token(#[from] auth::JwtError),

    #[error(transparent)]
    User(#[from] UserError),
}
