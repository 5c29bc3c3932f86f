//! Generic persistence port shared by every resource.
//!
//! A [`Record`] names its collection and its unique fields; a [`Repository`]
//! offers the same capability set over any record type. Query predicates and
//! partial updates are expressed with the store-agnostic [`Filter`] and
//! [`Changes`] types so adapters decide how to execute them.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

/// A document persisted in its own named collection.
///
/// Stored documents carry the store-assigned `id` (24 hex characters),
/// `created_at`, and `updated_at` in addition to the draft fields.
pub trait Record: DeserializeOwned + Clone + Debug + Send + Sync + Unpin + 'static {
    /// Fields supplied by the caller on creation.
    type Draft: Serialize + Debug + Send + Sync + 'static;

    /// Collection name in the document store.
    const COLLECTION: &'static str;

    /// Fields whose values must be unique across the collection.
    const UNIQUE_FIELDS: &'static [&'static str];
}

/// Errors raised by repository adapters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A write collided with a unique field.
    #[error("Duplicate value for unique field: {field}")]
    Duplicate { field: String },

    /// Connectivity or operation failure reported by the store.
    #[error("Database error: {0}")]
    Database(String),

    /// A stored document does not decode into its record type.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Query predicate over a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every record.
    All,

    /// Field equals value.
    Eq(&'static str, Value),

    /// Case-insensitive substring of `term` in any of `fields`.
    Search {
        term: String,
        fields: &'static [&'static str],
    },

    /// Every record except the one with this id.
    ExcludeId(String),

    /// Conjunction; an empty list matches everything.
    And(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: &'static str, value: impl Into<Value>) -> Self {
        Self::Eq(field, value.into())
    }

    /// Restrict `self` to records other than `id`.
    pub fn excluding(self, id: Option<&str>) -> Self {
        match id {
            Some(id) => Self::And(vec![self, Self::ExcludeId(id.to_string())]),
            None => self,
        }
    }
}

/// Sparse set of field assignments for a partial update.
///
/// Fields that are never set are left untouched by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Changes(Map<String, Value>);

impl Changes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    pub fn set_if_some<T: Into<Value>>(self, field: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.set(field, value),
            None => self,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// Uniform CRUD, pagination and existence operations over one collection.
///
/// Identifiers that are not well-formed store ids behave exactly like ids
/// of absent records: lookups yield `None`, deletes yield `false`.
#[async_trait]
pub trait Repository<R: Record>: Send + Sync + 'static {
    /// Insert a new record, stamping `created_at`.
    ///
    /// # Errors
    /// * `Duplicate` - A unique field collides with an existing record
    /// * `Database` - Store operation failed
    async fn create(&self, draft: R::Draft) -> Result<R, StoreError>;

    /// Fetch a record by identifier.
    async fn get_by_id(&self, id: &str) -> Result<Option<R>, StoreError>;

    /// First record matching `filter`, in store order.
    async fn find_one(&self, filter: Filter) -> Result<Option<R>, StoreError>;

    /// Records matching `filter` in store-native insertion order, after
    /// skipping `skip` and capped at `limit`.
    ///
    /// No sort key is applied, so pages are not stable under concurrent
    /// inserts.
    async fn list(&self, skip: u64, limit: u64, filter: Filter) -> Result<Vec<R>, StoreError>;

    /// Apply `changes` plus a fresh `updated_at` and return the full record.
    ///
    /// Returns `None` when the id is malformed, the record is absent, or
    /// nothing was modified.
    ///
    /// # Errors
    /// * `Duplicate` - A changed unique field collides with another record
    /// * `Database` - Store operation failed
    async fn update(&self, id: &str, changes: Changes) -> Result<Option<R>, StoreError>;

    /// Remove a record; true iff one existed.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;

    /// Number of records matching `filter`.
    async fn count(&self, filter: Filter) -> Result<u64, StoreError>;

    /// Whether at least one record matches `filter`.
    async fn exists(&self, filter: Filter) -> Result<bool, StoreError>;
}

/// Whether `value` is already used for `field` by a record other than `exclude`.
pub async fn is_taken<R, Repo>(
    repository: &Repo,
    field: &'static str,
    value: impl Into<Value>,
    exclude: Option<&str>,
) -> Result<bool, StoreError>
where
    R: Record,
    Repo: Repository<R> + ?Sized,
{
    repository
        .exists(Filter::eq(field, value).excluding(exclude))
        .await
}
