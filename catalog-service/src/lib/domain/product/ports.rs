use async_trait::async_trait;

use crate::domain::common::Page;
use crate::product::errors::ProductError;
use crate::product::models::CreateProductCommand;
use crate::product::models::Product;
use crate::product::models::ProductQuery;
use crate::product::models::UpdateProductCommand;

/// Port for product domain service operations.
#[async_trait]
pub trait ProductServicePort: Send + Sync + 'static {
    /// Create a new active product.
    ///
    /// # Errors
    /// * `NameAlreadyExists` - Another product uses this name
    /// * `Store` - Database operation failed
    async fn create_product(&self, command: CreateProductCommand)
        -> Result<Product, ProductError>;

    async fn get_product(&self, id: &str) -> Result<Product, ProductError>;

    async fn list_products(
        &self,
        page: Page,
        query: ProductQuery,
    ) -> Result<Vec<Product>, ProductError>;

    /// Merge the present fields of `command` into the product.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `NameAlreadyExists` - New name belongs to another product
    /// * `Store` - Database operation failed
    async fn update_product(
        &self,
        id: &str,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError>;

    async fn delete_product(&self, id: &str) -> Result<(), ProductError>;
}
