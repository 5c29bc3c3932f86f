use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ProductResponseData;
use crate::domain::common::Description;
use crate::domain::common::ResourceName;
use crate::inbound::http::extractors::ActiveUser;
use crate::inbound::http::extractors::JsonBody;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::product::errors::ProductError;
use crate::product::models::Category;
use crate::product::models::CreateProductCommand;
use crate::product::models::Price;
use crate::product::models::StockQuantity;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateProductRequest {
    name: String,
    description: Option<String>,
    price: f64,
    category: String,
    stock_quantity: i64,
}

impl CreateProductRequest {
    fn try_into_command(self) -> Result<CreateProductCommand, ProductError> {
        Ok(CreateProductCommand {
            name: ResourceName::new(self.name)?,
            description: self.description.map(Description::new).transpose()?,
            price: Price::new(self.price)?,
            category: Category::new(self.category)?,
            stock_quantity: StockQuantity::new(self.stock_quantity)?,
        })
    }
}

pub async fn create_product(
    State(state): State<AppState>,
    ActiveUser(_caller): ActiveUser,
    JsonBody(body): JsonBody<CreateProductRequest>,
) -> Result<ApiSuccess<ProductResponseData>, ApiError> {
    state
        .product_service
        .create_product(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::CREATED, product.into()))
}
