use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::UserResponseData;
use crate::domain::common::Page;
use crate::domain::user::models::UserQuery;
use crate::inbound::http::extractors::ActiveUser;
use crate::inbound::http::extractors::QueryParams;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListUsersParams {
    skip: Option<i64>,
    limit: Option<i64>,
    #[serde(default)]
    active_only: bool,
}

pub async fn list_users(
    State(state): State<AppState>,
    ActiveUser(_caller): ActiveUser,
    QueryParams(params): QueryParams<ListUsersParams>,
) -> Result<ApiSuccess<Vec<UserResponseData>>, ApiError> {
    let page = Page::new(params.skip, params.limit)?;
    let query = UserQuery {
        active_only: params.active_only,
    };

    let users = state.user_service.list_users(page, query).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        users.iter().map(UserResponseData::from).collect(),
    ))
}
