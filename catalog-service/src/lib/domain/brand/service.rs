use std::sync::Arc;

use async_trait::async_trait;

use crate::brand::errors::BrandError;
use crate::brand::models::Brand;
use crate::brand::models::BrandQuery;
use crate::brand::models::CreateBrandCommand;
use crate::brand::models::NewBrand;
use crate::brand::models::UpdateBrandCommand;
use crate::brand::ports::BrandServicePort;
use crate::domain::common::Page;
use crate::domain::record::is_taken;
use crate::domain::record::Changes;
use crate::domain::record::Filter;
use crate::domain::record::Repository;

const SEARCH_FIELDS: &[&str] = &["name", "description"];

/// Domain service implementation for brand operations.
pub struct BrandService<BR>
where
    BR: Repository<Brand>,
{
    repository: Arc<BR>,
}

impl<BR> BrandService<BR>
where
    BR: Repository<Brand>,
{
    pub fn new(repository: Arc<BR>) -> Self {
        Self { repository }
    }

    async fn ensure_name_available(
        &self,
        name: &str,
        exclude: Option<&str>,
    ) -> Result<(), BrandError> {
        if is_taken::<Brand, _>(self.repository.as_ref(), "name", name, exclude).await? {
            return Err(BrandError::NameAlreadyExists(name.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl<BR> BrandServicePort for BrandService<BR>
where
    BR: Repository<Brand>,
{
    async fn create_brand(&self, command: CreateBrandCommand) -> Result<Brand, BrandError> {
        self.ensure_name_available(command.name.as_str(), None)
            .await?;

        let brand = self
            .repository
            .create(NewBrand {
                name: command.name,
                description: command.description,
                is_active: true,
            })
            .await?;

        tracing::info!(brand_id = %brand.id, name = %brand.name, "Brand created");

        Ok(brand)
    }

    async fn get_brand(&self, id: &str) -> Result<Brand, BrandError> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| BrandError::NotFound(id.to_string()))
    }

    async fn list_brands(&self, page: Page, query: BrandQuery) -> Result<Vec<Brand>, BrandError> {
        let filter = match query.search {
            Some(term) => Filter::Search {
                term,
                fields: SEARCH_FIELDS,
            },
            None if query.active_only => Filter::eq("is_active", true),
            None => Filter::All,
        };

        Ok(self
            .repository
            .list(page.skip(), page.limit(), filter)
            .await?)
    }

    async fn update_brand(
        &self,
        id: &str,
        command: UpdateBrandCommand,
    ) -> Result<Brand, BrandError> {
        let brand = self.get_brand(id).await?;

        if let Some(name) = &command.name {
            self.ensure_name_available(name.as_str(), Some(&brand.id))
                .await?;
        }

        let changes = Changes::new()
            .set_if_some("name", command.name.map(String::from))
            .set_if_some("description", command.description.map(String::from))
            .set_if_some("is_active", command.is_active);

        let updated = self
            .repository
            .update(&brand.id, changes)
            .await?
            .ok_or_else(|| BrandError::NotFound(id.to_string()))?;

        tracing::info!(brand_id = %updated.id, "Brand updated");

        Ok(updated)
    }

    async fn delete_brand(&self, id: &str) -> Result<(), BrandError> {
        let brand = self.get_brand(id).await?;

        if !self.repository.delete(&brand.id).await? {
            return Err(BrandError::NotFound(id.to_string()));
        }

        tracing::info!(brand_id = %brand.id, "Brand deleted");

        Ok(())
    }
}
