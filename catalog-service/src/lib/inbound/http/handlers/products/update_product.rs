use axum::extract::Path;
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
use crate::product::models::Price;
use crate::product::models::StockQuantity;
use crate::product::models::UpdateProductCommand;

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    name: Option<String>,
    description: Option<String>,
    price: Option<f64>,
    category: Option<String>,
    stock_quantity: Option<i64>,
    is_active: Option<bool>,
}

impl UpdateProductRequest {
    fn try_into_command(self) -> Result<UpdateProductCommand, ProductError> {
        Ok(UpdateProductCommand {
            name: self.name.map(ResourceName::new).transpose()?,
            description: self.description.map(Description::new).transpose()?,
            price: self.price.map(Price::new).transpose()?,
            category: self.category.map(Category::new).transpose()?,
            stock_quantity: self.stock_quantity.map(StockQuantity::new).transpose()?,
            is_active: self.is_active,
        })
    }
}

pub async fn update_product(
    State(state): State<AppState>,
    ActiveUser(_caller): ActiveUser,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateProductRequest>,
) -> Result<ApiSuccess<ProductResponseData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .product_service
        .update_product(&id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::OK, product.into()))
}
