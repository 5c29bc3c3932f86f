use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::UserResponseData;
use crate::inbound::http::extractors::ActiveUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_user(
    State(state): State<AppState>,
    ActiveUser(_caller): ActiveUser,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    state
        .user_service
        .get_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
