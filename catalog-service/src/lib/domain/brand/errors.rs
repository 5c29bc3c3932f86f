use thiserror::Error;

use crate::domain::common::DescriptionError;
use crate::domain::common::NameError;
use crate::domain::record::StoreError;

#[derive(Debug, Clone, Error)]
pub enum BrandError {
    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("Invalid description: {0}")]
    InvalidDescription(#[from] DescriptionError),

    #[error("Brand not found")]
    NotFound(String),

    #[error("Brand name already exists")]
    NameAlreadyExists(String),

    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for BrandError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { field } => BrandError::NameAlreadyExists(field),
            other => BrandError::Store(other),
        }
    }
}
