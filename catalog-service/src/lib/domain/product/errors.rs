use thiserror::Error;

use crate::domain::common::DescriptionError;
use crate::domain::common::NameError;
use crate::domain::record::StoreError;

/// Error for Price validation failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PriceError {
    #[error("Price must be greater than 0, got {0}")]
    NotPositive(f64),

    #[error("Price must be a finite number")]
    NotFinite,
}

/// Error for Category validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CategoryError {
    #[error("Category too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Category too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for StockQuantity validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StockError {
    #[error("Stock quantity must be greater than or equal to 0, got {0}")]
    Negative(i64),
}

/// Top-level error for all product-related operations
#[derive(Debug, Clone, Error)]
pub enum ProductError {
    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("Invalid description: {0}")]
    InvalidDescription(#[from] DescriptionError),

    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    #[error("Invalid category: {0}")]
    InvalidCategory(#[from] CategoryError),

    #[error("Invalid stock quantity: {0}")]
    InvalidStock(#[from] StockError),

    #[error("Product not found")]
    NotFound(String),

    #[error("Product name already exists")]
    NameAlreadyExists(String),

    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for ProductError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { field } => ProductError::NameAlreadyExists(field),
            other => ProductError::Store(other),
        }
    }
}
