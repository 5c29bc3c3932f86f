use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::inbound::http::extractors::ActiveUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

pub async fn delete_product(
    State(state): State<AppState>,
    ActiveUser(_caller): ActiveUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.product_service.delete_product(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
