use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ProductResponseData;
use crate::inbound::http::extractors::ActiveUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_product(
    State(state): State<AppState>,
    ActiveUser(_caller): ActiveUser,
    Path(id): Path<String>,
) -> Result<ApiSuccess<ProductResponseData>, ApiError> {
    state
        .product_service
        .get_product(&id)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::OK, product.into()))
}
