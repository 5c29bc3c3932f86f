use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::brand::models::Brand;

mod create_brand;
mod delete_brand;
mod get_brand;
mod list_brands;
mod update_brand;

pub use create_brand::create_brand;
pub use delete_brand::delete_brand;
pub use get_brand::get_brand;
pub use list_brands::list_brands;
pub use list_brands::search_brands;
pub use update_brand::update_brand;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandResponseData {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Brand> for BrandResponseData {
    fn from(brand: &Brand) -> Self {
        Self {
            id: brand.id.clone(),
            name: brand.name.as_str().to_string(),
            description: brand.description.as_ref().map(|d| d.as_str().to_string()),
            is_active: brand.is_active,
            created_at: brand.created_at,
            updated_at: brand.updated_at,
        }
    }
}
