use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::product::models::Product;

mod create_product;
mod delete_product;
mod get_product;
mod list_products;
mod update_product;

pub use create_product::create_product;
pub use delete_product::delete_product;
pub use get_product::get_product;
pub use list_products::list_by_category;
pub use list_products::list_products;
pub use list_products::search_products;
pub use update_product::update_product;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponseData {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub stock_quantity: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Product> for ProductResponseData {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.as_str().to_string(),
            description: product.description.as_ref().map(|d| d.as_str().to_string()),
            price: product.price.value(),
            category: product.category.as_str().to_string(),
            stock_quantity: product.stock_quantity.value(),
            is_active: product.is_active,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
