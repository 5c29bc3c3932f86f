use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::BrandResponseData;
use crate::brand::errors::BrandError;
use crate::brand::models::CreateBrandCommand;
use crate::domain::common::Description;
use crate::domain::common::ResourceName;
use crate::inbound::http::extractors::ActiveUser;
use crate::inbound::http::extractors::JsonBody;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateBrandRequest {
    name: String,
    description: Option<String>,
}

impl CreateBrandRequest {
    fn try_into_command(self) -> Result<CreateBrandCommand, BrandError> {
        Ok(CreateBrandCommand {
            name: ResourceName::new(self.name)?,
            description: self.description.map(Description::new).transpose()?,
        })
    }
}

pub async fn create_brand(
    State(state): State<AppState>,
    ActiveUser(_caller): ActiveUser,
    JsonBody(body): JsonBody<CreateBrandRequest>,
) -> Result<ApiSuccess<BrandResponseData>, ApiError> {
    state
        .brand_service
        .create_brand(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref brand| ApiSuccess::new(StatusCode::CREATED, brand.into()))
}
