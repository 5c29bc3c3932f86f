use axum::http::StatusCode;

use super::UserResponseData;
use crate::inbound::http::extractors::ActiveUser;
use crate::inbound::http::handlers::ApiSuccess;

/// The caller's own account.
pub async fn get_profile(ActiveUser(user): ActiveUser) -> ApiSuccess<UserResponseData> {
    ApiSuccess::new(StatusCode::OK, (&user).into())
}
