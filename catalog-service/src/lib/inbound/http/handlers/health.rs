use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::router::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponseData {
    pub status: &'static str,
    pub service: String,
    pub version: &'static str,
}

/// Liveness probe; never touches the store.
pub async fn health(State(state): State<AppState>) -> ApiSuccess<HealthResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        HealthResponseData {
            status: "healthy",
            service: state.api.project_name.clone(),
            version: VERSION,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootResponseData {
    pub message: String,
    pub version: &'static str,
    pub health: &'static str,
}

pub async fn root(State(state): State<AppState>) -> ApiSuccess<RootResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        RootResponseData {
            message: format!("Welcome to {}", state.api.project_name),
            version: VERSION,
            health: "/health",
        },
    )
}
