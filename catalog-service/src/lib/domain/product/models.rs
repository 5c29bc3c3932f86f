use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::common::Description;
use crate::domain::common::ResourceName;
use crate::domain::record::Record;
use crate::product::errors::CategoryError;
use crate::product::errors::PriceError;
use crate::product::errors::StockError;

/// Catalog product.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: ResourceName,
    #[serde(default)]
    pub description: Option<Description>,
    pub price: Price,
    pub category: Category,
    pub stock_quantity: StockQuantity,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for Product {
    type Draft = NewProduct;

    const COLLECTION: &'static str = "products";
    const UNIQUE_FIELDS: &'static [&'static str] = &["name"];
}

/// Fields written when a product is first stored.
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    pub name: ResourceName,
    pub description: Option<Description>,
    pub price: Price,
    pub category: Category,
    pub stock_quantity: StockQuantity,
    pub is_active: bool,
}

/// Unit price, strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> Result<Self, PriceError> {
        if !value.is_finite() {
            return Err(PriceError::NotFinite);
        }
        if value <= 0.0 {
            return Err(PriceError::NotPositive(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Price {
    type Error = PriceError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

/// Product category label, 1-100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category(String);

impl Category {
    const MIN_LENGTH: usize = 1;
    const MAX_LENGTH: usize = 100;

    pub fn new(category: String) -> Result<Self, CategoryError> {
        let length = category.chars().count();
        if length < Self::MIN_LENGTH {
            Err(CategoryError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(CategoryError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(category))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Category {
    type Error = CategoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Units in stock, never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct StockQuantity(i64);

impl StockQuantity {
    pub fn new(value: i64) -> Result<Self, StockError> {
        if value < 0 {
            return Err(StockError::Negative(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for StockQuantity {
    type Error = StockError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StockQuantity> for i64 {
    fn from(quantity: StockQuantity) -> Self {
        quantity.0
    }
}

/// Command to create a new product with validated fields
#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub name: ResourceName,
    pub description: Option<Description>,
    pub price: Price,
    pub category: Category,
    pub stock_quantity: StockQuantity,
}

/// Partial product update; absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductCommand {
    pub name: Option<ResourceName>,
    pub description: Option<Description>,
    pub price: Option<Price>,
    pub category: Option<Category>,
    pub stock_quantity: Option<StockQuantity>,
    pub is_active: Option<bool>,
}

/// Listing options for products.
///
/// At most one filter is applied, in the order search, category,
/// active-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub active_only: bool,
}
