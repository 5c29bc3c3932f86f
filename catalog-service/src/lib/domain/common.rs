//! Value types shared by the catalog resources.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Error for pagination parameters
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("skip must be greater than or equal to 0, got {0}")]
    NegativeSkip(i64),

    #[error("limit must be between {min} and {max}, got {actual}")]
    LimitOutOfRange { min: i64, max: i64, actual: i64 },
}

/// Error for resource name validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Name too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for description validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DescriptionError {
    #[error("Description too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Skip/limit window over a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    skip: u64,
    limit: u64,
}

impl Page {
    pub const DEFAULT_LIMIT: i64 = 100;
    pub const MAX_LIMIT: i64 = 1000;

    /// Validate raw query parameters, applying defaults for absent ones.
    ///
    /// # Errors
    /// * `NegativeSkip` - skip below 0
    /// * `LimitOutOfRange` - limit outside 1..=1000
    pub fn new(skip: Option<i64>, limit: Option<i64>) -> Result<Self, PageError> {
        let skip = skip.unwrap_or(0);
        let limit = limit.unwrap_or(Self::DEFAULT_LIMIT);

        if skip < 0 {
            return Err(PageError::NegativeSkip(skip));
        }
        if !(1..=Self::MAX_LIMIT).contains(&limit) {
            return Err(PageError::LimitOutOfRange {
                min: 1,
                max: Self::MAX_LIMIT,
                actual: limit,
            });
        }

        Ok(Self {
            skip: skip as u64,
            limit: limit as u64,
        })
    }

    pub fn skip(&self) -> u64 {
        self.skip
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: Self::DEFAULT_LIMIT as u64,
        }
    }
}

/// Name of a catalog resource, unique within its collection.
///
/// 1-200 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceName(String);

impl ResourceName {
    const MIN_LENGTH: usize = 1;
    const MAX_LENGTH: usize = 200;

    pub fn new(name: String) -> Result<Self, NameError> {
        let length = name.chars().count();
        if length < Self::MIN_LENGTH {
            Err(NameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ResourceName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ResourceName> for String {
    fn from(name: ResourceName) -> Self {
        name.0
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Free-form description, at most 1000 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    const MAX_LENGTH: usize = 1000;

    pub fn new(description: String) -> Result<Self, DescriptionError> {
        let length = description.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(DescriptionError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(description))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Description {
    type Error = DescriptionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Description> for String {
    fn from(description: Description) -> Self {
        description.0
    }
}
