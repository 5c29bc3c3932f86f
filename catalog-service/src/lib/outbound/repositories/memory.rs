use std::marker::PhantomData;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::Map;
use serde_json::Value;
use tokio::sync::RwLock;

use super::timestamp;
use crate::domain::record::Changes;
use crate::domain::record::Filter;
use crate::domain::record::Record;
use crate::domain::record::Repository;
use crate::domain::record::StoreError;

type Document = Map<String, Value>;

/// In-process document store with the same observable behaviour as the
/// MongoDB adapter: ObjectId-shaped ids, insertion order, unique fields.
pub struct MemoryRepository<R: Record> {
    documents: RwLock<Vec<Document>>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> MemoryRepository<R> {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
            _record: PhantomData,
        }
    }

    fn decode(document: &Document) -> Result<R, StoreError> {
        serde_json::from_value(Value::Object(document.clone()))
            .map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn matches(filter: &Filter, document: &Document) -> bool {
        match filter {
            Filter::All => true,
            Filter::Eq(field, value) => document.get(*field) == Some(value),
            Filter::Search { term, fields } => {
                let term = term.to_lowercase();
                fields.iter().any(|field| {
                    document
                        .get(*field)
                        .and_then(Value::as_str)
                        .is_some_and(|text| text.to_lowercase().contains(&term))
                })
            }
            Filter::ExcludeId(id) => {
                document.get("id").and_then(Value::as_str) != Some(id.as_str())
            }
            Filter::And(filters) => filters.iter().all(|f| Self::matches(f, document)),
        }
    }

    /// First unique field of `candidate` already used by another document.
    fn conflict(documents: &[Document], candidate: &Document, own_id: Option<&str>) -> Option<String> {
        R::UNIQUE_FIELDS
            .iter()
            .find(|field| {
                let Some(value) = candidate.get(**field) else {
                    return false;
                };
                documents.iter().any(|document| {
                    document.get("id").and_then(Value::as_str) != own_id
                        && document.get(**field) == Some(value)
                })
            })
            .map(|field| field.to_string())
    }

    fn position(documents: &[Document], id: &str) -> Option<usize> {
        ObjectId::parse_str(id).ok()?;
        documents
            .iter()
            .position(|document| document.get("id").and_then(Value::as_str) == Some(id))
    }
}

impl<R: Record> Default for MemoryRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> Repository<R> for MemoryRepository<R> {
    async fn create(&self, draft: R::Draft) -> Result<R, StoreError> {
        let Value::Object(mut document) =
            serde_json::to_value(&draft).map_err(|e| StoreError::Serialization(e.to_string()))?
        else {
            return Err(StoreError::Serialization(
                "record draft must serialize to an object".to_string(),
            ));
        };

        let mut documents = self.documents.write().await;

        if let Some(field) = Self::conflict(&documents, &document, None) {
            return Err(StoreError::Duplicate { field });
        }

        document.insert("id".to_string(), Value::String(ObjectId::new().to_hex()));
        document.insert("created_at".to_string(), Value::String(timestamp()));

        let record = Self::decode(&document)?;
        documents.push(document);

        Ok(record)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<R>, StoreError> {
        let documents = self.documents.read().await;

        Self::position(&documents, id)
            .map(|index| Self::decode(&documents[index]))
            .transpose()
    }

    async fn find_one(&self, filter: Filter) -> Result<Option<R>, StoreError> {
        let documents = self.documents.read().await;

        documents
            .iter()
            .find(|document| Self::matches(&filter, document))
            .map(Self::decode)
            .transpose()
    }

    async fn list(&self, skip: u64, limit: u64, filter: Filter) -> Result<Vec<R>, StoreError> {
        let documents = self.documents.read().await;

        documents
            .iter()
            .filter(|document| Self::matches(&filter, document))
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(Self::decode)
            .collect()
    }

    async fn update(&self, id: &str, changes: Changes) -> Result<Option<R>, StoreError> {
        let mut documents = self.documents.write().await;

        let Some(index) = Self::position(&documents, id) else {
            return Ok(None);
        };

        let mut updated = documents[index].clone();
        updated.extend(changes.into_inner());
        updated.insert("updated_at".to_string(), Value::String(timestamp()));

        if let Some(field) = Self::conflict(&documents, &updated, Some(id)) {
            return Err(StoreError::Duplicate { field });
        }

        // Decode before committing so a bad change leaves the record intact.
        let record = Self::decode(&updated)?;
        documents[index] = updated;

        Ok(Some(record))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut documents = self.documents.write().await;

        match Self::position(&documents, id) {
            Some(index) => {
                documents.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self, filter: Filter) -> Result<u64, StoreError> {
        let documents = self.documents.read().await;

        Ok(documents
            .iter()
            .filter(|document| Self::matches(&filter, document))
            .count() as u64)
    }

    async fn exists(&self, filter: Filter) -> Result<bool, StoreError> {
        let documents = self.documents.read().await;

        Ok(documents
            .iter()
            .any(|document| Self::matches(&filter, document)))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::brand::models::Brand;
    use crate::brand::models::NewBrand;
    use crate::domain::common::Description;
    use crate::domain::common::ResourceName;

    fn draft(name: &str) -> NewBrand {
        NewBrand {
            name: ResourceName::new(name.to_string()).unwrap(),
            description: Some(Description::new(format!("About {name}")).unwrap()),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_object_id_and_created_at() {
        let repository = MemoryRepository::<Brand>::new();

        let brand = repository.create(draft("Acme")).await.unwrap();

        assert!(ObjectId::parse_str(&brand.id).is_ok());
        assert!(brand.updated_at.is_none());
        assert_eq!(
            repository.get_by_id(&brand.id).await.unwrap(),
            Some(brand)
        );
    }

    #[tokio::test]
    async fn test_unique_field_conflict() {
        let repository = MemoryRepository::<Brand>::new();
        repository.create(draft("Acme")).await.unwrap();

        let err = repository.create(draft("Acme")).await.unwrap_err();

        assert_eq!(
            err,
            StoreError::Duplicate {
                field: "name".to_string()
            }
        );
        assert_eq!(repository.count(Filter::All).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_malformed_and_absent_ids_behave_alike() {
        let repository = MemoryRepository::<Brand>::new();

        assert!(repository.get_by_id("invalid_id").await.unwrap().is_none());
        assert!(repository
            .get_by_id("507f1f77bcf86cd799439999")
            .await
            .unwrap()
            .is_none());
        assert!(!repository.delete("invalid_id").await.unwrap());
        assert!(repository
            .update("invalid_id", Changes::new().set("is_active", false))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_is_sparse_and_stamps_updated_at() {
        let repository = MemoryRepository::<Brand>::new();
        let brand = repository.create(draft("Acme")).await.unwrap();

        let updated = repository
            .update(&brand.id, Changes::new().set("is_active", false))
            .await
            .unwrap()
            .unwrap();

        assert!(!updated.is_active);
        assert_eq!(updated.name, brand.name);
        assert_eq!(updated.description, brand.description);
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_update_into_existing_name_conflicts() {
        let repository = MemoryRepository::<Brand>::new();
        repository.create(draft("Acme")).await.unwrap();
        let globex = repository.create(draft("Globex")).await.unwrap();

        let err = repository
            .update(&globex.id, Changes::new().set("name", "Acme"))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Duplicate { .. }));
        assert_eq!(
            repository.get_by_id(&globex.id).await.unwrap().unwrap().name,
            globex.name
        );
    }

    #[tokio::test]
    async fn test_invalid_change_leaves_record_intact() {
        let repository = MemoryRepository::<Brand>::new();
        let brand = repository.create(draft("Acme")).await.unwrap();

        let result = repository
            .update(&brand.id, Changes::new().set("name", ""))
            .await;

        assert!(matches!(result, Err(StoreError::Serialization(_))));
        assert_eq!(repository.get_by_id(&brand.id).await.unwrap(), Some(brand));
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let repository = MemoryRepository::<Brand>::new();
        let brand = repository.create(draft("Acme")).await.unwrap();

        assert!(repository.delete(&brand.id).await.unwrap());
        assert!(!repository.delete(&brand.id).await.unwrap());
        assert!(repository.get_by_id(&brand.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_filters() {
        let repository = MemoryRepository::<Brand>::new();
        let acme = repository.create(draft("Acme")).await.unwrap();
        repository.create(draft("Globex")).await.unwrap();

        assert!(repository
            .exists(Filter::eq("name", "Acme"))
            .await
            .unwrap());
        assert!(!repository
            .exists(Filter::eq("name", "Acme").excluding(Some(&acme.id)))
            .await
            .unwrap());
        assert_eq!(
            repository
                .count(Filter::Search {
                    term: "ABOUT".to_string(),
                    fields: &["name", "description"],
                })
                .await
                .unwrap(),
            2
        );
        assert_eq!(
            repository
                .find_one(Filter::Eq("name", json!("Globex")))
                .await
                .unwrap()
                .unwrap()
                .name
                .as_str(),
            "Globex"
        );
    }
}
