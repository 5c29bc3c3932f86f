use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Bson;
use mongodb::bson::Document;
use mongodb::error::ErrorKind;
use mongodb::error::WriteFailure;
use mongodb::options::ClientOptions;
use mongodb::options::IndexOptions;
use mongodb::options::ReturnDocument;
use mongodb::Client;
use mongodb::Collection;
use mongodb::Database;
use mongodb::IndexModel;
use tracing::instrument;

use super::timestamp;
use crate::config::DatabaseConfig;
use crate::domain::record::Changes;
use crate::domain::record::Filter;
use crate::domain::record::Record;
use crate::domain::record::Repository;
use crate::domain::record::StoreError;

const DUPLICATE_KEY: i32 = 11000;

/// Connect to MongoDB and select the configured database.
///
/// The connection is verified with a `ping` so a misconfigured URL fails at
/// startup rather than on the first request.
pub async fn connect(config: &DatabaseConfig) -> Result<Database, StoreError> {
    tracing::info!(database = %config.name, "Connecting to MongoDB");

    let mut options = ClientOptions::parse(&config.url).await.map_err(store_error)?;
    options.max_pool_size = Some(config.max_pool_size);
    options.connect_timeout = Some(Duration::from_secs(10));
    options.server_selection_timeout = Some(Duration::from_secs(30));
    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

    let client = Client::with_options(options).map_err(store_error)?;
    let database = client.database(&config.name);

    database
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(store_error)?;

    tracing::info!("Successfully connected to MongoDB");
    Ok(database)
}

/// MongoDB implementation of the generic repository.
///
/// Documents are kept untyped at the driver level; `_id` is rewritten to a
/// hex `id` before decoding into `R`.
pub struct MongoRepository<R: Record> {
    collection: Collection<Document>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> MongoRepository<R> {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection::<Document>(R::COLLECTION),
            _record: PhantomData,
        }
    }

    /// Create one unique index per unique field, named after the field.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        for field in R::UNIQUE_FIELDS {
            let mut keys = Document::new();
            keys.insert(*field, 1);

            let index = IndexModel::builder()
                .keys(keys)
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name(field.to_string())
                        .build(),
                )
                .build();

            self.collection
                .create_index(index)
                .await
                .map_err(store_error)?;
        }

        tracing::debug!(collection = R::COLLECTION, "Unique indexes ensured");
        Ok(())
    }

    fn build_filter(filter: &Filter) -> Result<Document, StoreError> {
        let document = match filter {
            Filter::All => Document::new(),
            Filter::Eq(field, value) => {
                let mut document = Document::new();
                document.insert(*field, to_bson(value)?);
                document
            }
            Filter::Search { term, fields } => {
                let pattern = regex::escape(term);
                let clauses: Vec<Document> = fields
                    .iter()
                    .map(|field| {
                        let mut clause = Document::new();
                        clause.insert(*field, doc! { "$regex": pattern.clone(), "$options": "i" });
                        clause
                    })
                    .collect();
                doc! { "$or": clauses }
            }
            // A malformed id matches no stored record, so nothing is excluded.
            Filter::ExcludeId(id) => match ObjectId::parse_str(id) {
                Ok(oid) => doc! { "_id": { "$ne": oid } },
                Err(_) => Document::new(),
            },
            Filter::And(filters) if filters.is_empty() => Document::new(),
            Filter::And(filters) => {
                let clauses = filters
                    .iter()
                    .map(Self::build_filter)
                    .collect::<Result<Vec<_>, _>>()?;
                doc! { "$and": clauses }
            }
        };

        Ok(document)
    }

    fn decode(mut document: Document) -> Result<R, StoreError> {
        if let Ok(oid) = document.get_object_id("_id") {
            document.remove("_id");
            document.insert("id", oid.to_hex());
        }

        bson::from_document(document).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn map_error(&self, err: mongodb::error::Error) -> StoreError {
        let conflict = match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write_error))
                if write_error.code == DUPLICATE_KEY =>
            {
                Some(write_error.message.as_str())
            }
            ErrorKind::Command(command_error) if command_error.code == DUPLICATE_KEY => {
                Some(command_error.message.as_str())
            }
            _ => None,
        };

        match conflict {
            Some(message) => StoreError::Duplicate {
                field: duplicate_field(message, R::UNIQUE_FIELDS),
            },
            None => store_error(err),
        }
    }
}

#[async_trait]
impl<R: Record> Repository<R> for MongoRepository<R> {
    #[instrument(skip(self, draft), fields(collection = R::COLLECTION))]
    async fn create(&self, draft: R::Draft) -> Result<R, StoreError> {
        let mut document =
            bson::to_document(&draft).map_err(|e| StoreError::Serialization(e.to_string()))?;
        document.insert("created_at", timestamp());

        let result = self
            .collection
            .insert_one(&document)
            .await
            .map_err(|e| self.map_error(e))?;

        document.insert("_id", result.inserted_id);
        Self::decode(document)
    }

    #[instrument(skip(self), fields(collection = R::COLLECTION))]
    async fn get_by_id(&self, id: &str) -> Result<Option<R>, StoreError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        self.collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(store_error)?
            .map(Self::decode)
            .transpose()
    }

    #[instrument(skip(self), fields(collection = R::COLLECTION))]
    async fn find_one(&self, filter: Filter) -> Result<Option<R>, StoreError> {
        self.collection
            .find_one(Self::build_filter(&filter)?)
            .await
            .map_err(store_error)?
            .map(Self::decode)
            .transpose()
    }

    #[instrument(skip(self), fields(collection = R::COLLECTION))]
    async fn list(&self, skip: u64, limit: u64, filter: Filter) -> Result<Vec<R>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let cursor = self
            .collection
            .find(Self::build_filter(&filter)?)
            .skip(skip)
            .limit(limit)
            .await
            .map_err(store_error)?;

        let documents: Vec<Document> = cursor.try_collect().await.map_err(store_error)?;

        documents.into_iter().map(Self::decode).collect()
    }

    #[instrument(skip(self, changes), fields(collection = R::COLLECTION))]
    async fn update(&self, id: &str, changes: Changes) -> Result<Option<R>, StoreError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let mut set = Document::new();
        for (field, value) in changes.iter() {
            set.insert(field.as_str(), to_bson(value)?);
        }
        set.insert("updated_at", timestamp());

        self.collection
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| self.map_error(e))?
            .map(Self::decode)
            .transpose()
    }

    #[instrument(skip(self), fields(collection = R::COLLECTION))]
    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(false);
        };

        let result = self
            .collection
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(store_error)?;

        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self), fields(collection = R::COLLECTION))]
    async fn count(&self, filter: Filter) -> Result<u64, StoreError> {
        self.collection
            .count_documents(Self::build_filter(&filter)?)
            .await
            .map_err(store_error)
    }

    #[instrument(skip(self), fields(collection = R::COLLECTION))]
    async fn exists(&self, filter: Filter) -> Result<bool, StoreError> {
        let count = self
            .collection
            .count_documents(Self::build_filter(&filter)?)
            .limit(1)
            .await
            .map_err(store_error)?;

        Ok(count > 0)
    }
}

fn store_error(err: mongodb::error::Error) -> StoreError {
    StoreError::Database(err.to_string())
}

fn to_bson(value: &serde_json::Value) -> Result<Bson, StoreError> {
    bson::to_bson(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Field named by a duplicate-key message such as
/// `E11000 duplicate key error collection: shop.users index: email dup key: ...`.
fn duplicate_field(message: &str, fields: &[&str]) -> String {
    fields
        .iter()
        .find(|field| message.contains(&format!("index: {field} ")))
        .or_else(|| fields.first())
        .map(|field| field.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
