use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::features::marketplace::models::ListingCategory;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListingResponseDto {
    pub id: Uuid,
    pub category: ListingCategory,
    pub title: String,
    pub description: String,
    pub rate: String,
    pub location: String,
    pub photos: Vec<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for creating a listing
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateListingDto {
    #[serde(default)]
    pub category: Option<ListingCategory>,

    #[validate(length(max = 200, message = "Title must not exceed 200 characters"))]
    #[serde(default)]
    pub title: String,

    #[validate(length(max = 5000, message = "Description must not exceed 5000 characters"))]
    #[serde(default)]
    pub description: String,

    #[validate(length(max = 60, message = "Rate must not exceed 60 characters"))]
    #[serde(default)]
    pub rate: String,

    #[validate(length(max = 120, message = "Location must not exceed 120 characters"))]
    #[serde(default)]
    pub location: String,

    /// Photo URLs; blank entries are dropped
    #[validate(length(max = 10, message = "At most 10 photos are allowed"))]
    #[serde(default)]
    pub photos: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListingListQuery {
    /// "gear", "location", "service", or "all" (the default)
    pub category: Option<String>,
}

impl ListingListQuery {
    /// `None` when every category is wanted
    pub fn category(&self) -> Result<Option<ListingCategory>> {
        match self.category.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(c) if c.eq_ignore_ascii_case("all") => Ok(None),
            Some(c) => c.parse().map(Some),
        }
    }
}
