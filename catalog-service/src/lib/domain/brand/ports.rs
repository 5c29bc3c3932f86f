use async_trait::async_trait;

use crate::brand::errors::BrandError;
use crate::brand::models::Brand;
use crate::brand::models::BrandQuery;
use crate::brand::models::CreateBrandCommand;
use crate::brand::models::UpdateBrandCommand;
use crate::domain::common::Page;

/// Port for brand domain service operations.
#[async_trait]
pub trait BrandServicePort: Send + Sync + 'static {
    async fn create_brand(&self, command: CreateBrandCommand) -> Result<Brand, BrandError>;

    async fn get_brand(&self, id: &str) -> Result<Brand, BrandError>;

    async fn list_brands(&self, page: Page, query: BrandQuery) -> Result<Vec<Brand>, BrandError>;

    async fn update_brand(&self, id: &str, command: UpdateBrandCommand)
        -> Result<Brand, BrandError>;

    async fn delete_brand(&self, id: &str) -> Result<(), BrandError>;
}
