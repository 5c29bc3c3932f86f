use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::BrandResponseData;
use crate::inbound::http::extractors::ActiveUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_brand(
    State(state): State<AppState>,
    ActiveUser(_caller): ActiveUser,
    Path(id): Path<String>,
) -> Result<ApiSuccess<BrandResponseData>, ApiError> {
    state
        .brand_service
        .get_brand(&id)
        .await
        .map_err(ApiError::from)
        .map(|ref brand| ApiSuccess::new(StatusCode::OK, brand.into()))
}
