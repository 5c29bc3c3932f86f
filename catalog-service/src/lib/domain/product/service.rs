use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::common::Page;
use crate::domain::record::is_taken;
use crate::domain::record::Changes;
use crate::domain::record::Filter;
use crate::domain::record::Repository;
use crate::product::errors::ProductError;
use crate::product::models::CreateProductCommand;
use crate::product::models::NewProduct;
use crate::product::models::Product;
use crate::product::models::ProductQuery;
use crate::product::models::UpdateProductCommand;
use crate::product::ports::ProductServicePort;

const SEARCH_FIELDS: &[&str] = &["name", "description"];

/// Domain service implementation for product operations.
pub struct ProductService<PR>
where
    PR: Repository<Product>,
{
    repository: Arc<PR>,
}

impl<PR> ProductService<PR>
where
    PR: Repository<Product>,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }

    async fn ensure_name_available(
        &self,
        name: &str,
        exclude: Option<&str>,
    ) -> Result<(), ProductError> {
        if is_taken::<Product, _>(self.repository.as_ref(), "name", name, exclude).await? {
            return Err(ProductError::NameAlreadyExists(name.to_string()));
        }
        Ok(())
    }
}

impl ProductQuery {
    fn into_filter(self) -> Filter {
        if let Some(term) = self.search {
            Filter::Search {
                term,
                fields: SEARCH_FIELDS,
            }
        } else if let Some(category) = self.category {
            Filter::eq("category", category)
        } else if self.active_only {
            Filter::eq("is_active", true)
        } else {
            Filter::All
        }
    }
}

#[async_trait]
impl<PR> ProductServicePort for ProductService<PR>
where
    PR: Repository<Product>,
{
    async fn create_product(
        &self,
        command: CreateProductCommand,
    ) -> Result<Product, ProductError> {
        self.ensure_name_available(command.name.as_str(), None)
            .await?;

        let product = self
            .repository
            .create(NewProduct {
                name: command.name,
                description: command.description,
                price: command.price,
                category: command.category,
                stock_quantity: command.stock_quantity,
                is_active: true,
            })
            .await?;

        tracing::info!(product_id = %product.id, name = %product.name, "Product created");

        Ok(product)
    }

    async fn get_product(&self, id: &str) -> Result<Product, ProductError> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    async fn list_products(
        &self,
        page: Page,
        query: ProductQuery,
    ) -> Result<Vec<Product>, ProductError> {
        Ok(self
            .repository
            .list(page.skip(), page.limit(), query.into_filter())
            .await?)
    }

    async fn update_product(
        &self,
        id: &str,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError> {
        let product = self.get_product(id).await?;

        if let Some(name) = &command.name {
            self.ensure_name_available(name.as_str(), Some(&product.id))
                .await?;
        }

        let changes = Changes::new()
            .set_if_some("name", command.name.map(String::from))
            .set_if_some("description", command.description.map(String::from))
            .set_if_some("price", command.price.map(f64::from))
            .set_if_some("category", command.category.map(String::from))
            .set_if_some("stock_quantity", command.stock_quantity.map(i64::from))
            .set_if_some("is_active", command.is_active);

        let updated = self
            .repository
            .update(&product.id, changes)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;

        tracing::info!(product_id = %updated.id, "Product updated");

        Ok(updated)
    }

    async fn delete_product(&self, id: &str) -> Result<(), ProductError> {
        let product = self.get_product(id).await?;

        if !self.repository.delete(&product.id).await? {
            return Err(ProductError::NotFound(id.to_string()));
        }

        tracing::info!(product_id = %product.id, "Product deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use mockall::mock;

    use super::*;
    use crate::domain::common::Description;
    use crate::domain::common::ResourceName;
    use crate::domain::record::StoreError;
    use crate::outbound::repositories::MemoryRepository;
    use crate::product::models::Category;
    use crate::product::models::Price;
    use crate::product::models::StockQuantity;

    mock! {
        pub TestProductRepository {}

        #[async_trait]
        impl Repository<Product> for TestProductRepository {
            async fn create(&self, draft: NewProduct) -> Result<Product, StoreError>;
            async fn get_by_id(&self, id: &str) -> Result<Option<Product>, StoreError>;
            async fn find_one(&self, filter: Filter) -> Result<Option<Product>, StoreError>;
            async fn list(&self, skip: u64, limit: u64, filter: Filter) -> Result<Vec<Product>, StoreError>;
            async fn update(&self, id: &str, changes: Changes) -> Result<Option<Product>, StoreError>;
            async fn delete(&self, id: &str) -> Result<bool, StoreError>;
            async fn count(&self, filter: Filter) -> Result<u64, StoreError>;
            async fn exists(&self, filter: Filter) -> Result<bool, StoreError>;
        }
    }

    fn command(name: &str, category: &str, price: f64) -> CreateProductCommand {
        CreateProductCommand {
            name: ResourceName::new(name.to_string()).unwrap(),
            description: Some(Description::new(format!("{name} description")).unwrap()),
            price: Price::new(price).unwrap(),
            category: Category::new(category.to_string()).unwrap(),
            stock_quantity: StockQuantity::new(10).unwrap(),
        }
    }

    fn memory_service() -> ProductService<MemoryRepository<Product>> {
        ProductService::new(Arc::new(MemoryRepository::new()))
    }

    #[tokio::test]
    async fn test_create_product_is_active() {
        let service = memory_service();

        let product = service
            .create_product(command("Widget", "Tools", 9.99))
            .await
            .unwrap();

        assert_eq!(product.id.len(), 24);
        assert!(product.is_active);
        assert!(product.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_create_product_duplicate_name() {
        let service = memory_service();
        service
            .create_product(command("Widget", "Tools", 9.99))
            .await
            .unwrap();

        let result = service
            .create_product(command("Widget", "Garden", 1.0))
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, ProductError::NameAlreadyExists(_)));
        assert_eq!(err.to_string(), "Product name already exists");
    }

    #[tokio::test]
    async fn test_create_product_store_failure() {
        let mut repository = MockTestProductRepository::new();
        repository.expect_exists().times(1).returning(|_| Ok(false));
        repository
            .expect_create()
            .times(1)
            .returning(|_| Err(StoreError::Database("timeout".to_string())));

        let service = ProductService::new(Arc::new(repository));
        let result = service
            .create_product(command("Widget", "Tools", 9.99))
            .await;

        assert!(matches!(result.unwrap_err(), ProductError::Store(_)));
    }

    #[tokio::test]
    async fn test_update_price_only_leaves_other_fields() {
        let service = memory_service();
        let product = service
            .create_product(command("Widget", "Tools", 9.99))
            .await
            .unwrap();
        let first = service
            .update_product(
                &product.id,
                UpdateProductCommand {
                    stock_quantity: Some(StockQuantity::new(7).unwrap()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;

        let updated = service
            .update_product(
                &product.id,
                UpdateProductCommand {
                    price: Some(Price::new(19.5).unwrap()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price.value(), 19.5);
        assert_eq!(updated.name, product.name);
        assert_eq!(updated.category, product.category);
        assert_eq!(updated.stock_quantity.value(), 7);
        assert_eq!(updated.created_at, product.created_at);
        assert!(updated.updated_at.unwrap() > first.updated_at.unwrap());
    }

    #[tokio::test]
    async fn test_update_name_to_own_name_is_allowed() {
        let service = memory_service();
        let product = service
            .create_product(command("Widget", "Tools", 9.99))
            .await
            .unwrap();

        let updated = service
            .update_product(
                &product.id,
                UpdateProductCommand {
                    name: Some(ResourceName::new("Widget".to_string()).unwrap()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name.as_str(), "Widget");
    }

    #[tokio::test]
    async fn test_update_name_taken_by_other_product() {
        let service = memory_service();
        service
            .create_product(command("Widget", "Tools", 9.99))
            .await
            .unwrap();
        let gadget = service
            .create_product(command("Gadget", "Tools", 4.0))
            .await
            .unwrap();

        let result = service
            .update_product(
                &gadget.id,
                UpdateProductCommand {
                    name: Some(ResourceName::new("Widget".to_string()).unwrap()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(
            result.unwrap_err(),
            ProductError::NameAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let mut repository = MockTestProductRepository::new();
        repository
            .expect_get_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_update().never();

        let service = ProductService::new(Arc::new(repository));
        let result = service
            .update_product("507f1f77bcf86cd799439999", UpdateProductCommand::default())
            .await;

        assert!(matches!(result.unwrap_err(), ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_malformed_and_absent_ids_are_not_found() {
        let service = memory_service();

        assert!(matches!(
            service.get_product("invalid_id").await.unwrap_err(),
            ProductError::NotFound(_)
        ));
        assert!(matches!(
            service
                .get_product("507f1f77bcf86cd799439999")
                .await
                .unwrap_err(),
            ProductError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let service = memory_service();
        let product = service
            .create_product(command("Widget", "Tools", 9.99))
            .await
            .unwrap();

        service.delete_product(&product.id).await.unwrap();

        assert!(matches!(
            service.get_product(&product.id).await.unwrap_err(),
            ProductError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_list_filter_priority() {
        let service = memory_service();
        service
            .create_product(command("Blue Widget", "Tools", 9.99))
            .await
            .unwrap();
        service
            .create_product(command("Red Gadget", "Toys", 4.0))
            .await
            .unwrap();
        let hammer = service
            .create_product(command("Hammer", "Tools", 15.0))
            .await
            .unwrap();
        service
            .update_product(
                &hammer.id,
                UpdateProductCommand {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // search wins over category and active_only
        let searched = service
            .list_products(
                Page::default(),
                ProductQuery {
                    search: Some("gadget".to_string()),
                    category: Some("Tools".to_string()),
                    active_only: true,
                },
            )
            .await
            .unwrap();
        assert_eq!(searched.len(), 1);
        assert_eq!(searched[0].name.as_str(), "Red Gadget");

        // category wins over active_only
        let by_category = service
            .list_products(
                Page::default(),
                ProductQuery {
                    category: Some("Tools".to_string()),
                    active_only: true,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(by_category.len(), 2);

        let active = service
            .list_products(
                Page::default(),
                ProductQuery {
                    active_only: true,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(active.len(), 2);

        let all = service
            .list_products(Page::default(), ProductQuery::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_list_applies_skip_and_limit_in_insertion_order() {
        let service = memory_service();
        for name in ["A", "B", "C", "D"] {
            service
                .create_product(command(name, "Letters", 1.0))
                .await
                .unwrap();
        }

        let page = Page::new(Some(1), Some(2)).unwrap();
        let products = service
            .list_products(page, ProductQuery::default())
            .await
            .unwrap();

        let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[test]
    fn test_query_into_filter() {
        assert_eq!(ProductQuery::default().into_filter(), Filter::All);
        assert_eq!(
            ProductQuery {
                category: Some("Books".to_string()),
                active_only: true,
                ..Default::default()
            }
            .into_filter(),
            Filter::eq("category", "Books")
        );
    }
}
