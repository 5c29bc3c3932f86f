use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::common::Description;
use crate::domain::common::ResourceName;
use crate::domain::record::Record;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Brand {
    pub id: String,
    pub name: ResourceName,
    #[serde(default)]
    pub description: Option<Description>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for Brand {
    type Draft = NewBrand;

    // Singular, matching the collection already used by deployed data.
    const COLLECTION: &'static str = "brand";
    const UNIQUE_FIELDS: &'static [&'static str] = &["name"];
}

#[derive(Debug, Clone, Serialize)]
pub struct NewBrand {
    pub name: ResourceName,
    pub description: Option<Description>,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct CreateBrandCommand {
    pub name: ResourceName,
    pub description: Option<Description>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateBrandCommand {
    pub name: Option<ResourceName>,
    pub description: Option<Description>,
    pub is_active: Option<bool>,
}

/// Listing options for brands; search takes precedence over active-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandQuery {
    pub search: Option<String>,
    pub active_only: bool,
}
