use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::ports::AccessToken;
use crate::inbound::http::extractors::FormBody;
use crate::inbound::http::extractors::JsonBody;
use crate::inbound::http::router::AppState;

/// Credentials, either as an OAuth2 password form or a JSON body.
///
/// Extra form fields such as `grant_type` and `scope` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

pub async fn login(
    State(state): State<AppState>,
    FormBody(body): FormBody<LoginRequest>,
) -> Result<ApiSuccess<AccessToken>, ApiError> {
    issue_token(&state, body).await
}

pub async fn login_json(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<ApiSuccess<AccessToken>, ApiError> {
    issue_token(&state, body).await
}

async fn issue_token(
    state: &AppState,
    body: LoginRequest,
) -> Result<ApiSuccess<AccessToken>, ApiError> {
    state
        .auth_service
        .login(&body.username, &body.password)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, token))
}
