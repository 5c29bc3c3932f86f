use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::BrandResponseData;
use crate::brand::errors::BrandError;
use crate::brand::models::UpdateBrandCommand;
use crate::domain::common::Description;
use crate::domain::common::ResourceName;
use crate::inbound::http::extractors::ActiveUser;
use crate::inbound::http::extractors::JsonBody;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct UpdateBrandRequest {
    name: Option<String>,
    description: Option<String>,
    is_active: Option<bool>,
}

impl UpdateBrandRequest {
    fn try_into_command(self) -> Result<UpdateBrandCommand, BrandError> {
        Ok(UpdateBrandCommand {
            name: self.name.map(ResourceName::new).transpose()?,
            description: self.description.map(Description::new).transpose()?,
            is_active: self.is_active,
        })
    }
}

pub async fn update_brand(
    State(state): State<AppState>,
    ActiveUser(_caller): ActiveUser,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateBrandRequest>,
) -> Result<ApiSuccess<BrandResponseData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .brand_service
        .update_brand(&id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref brand| ApiSuccess::new(StatusCode::OK, brand.into()))
}
