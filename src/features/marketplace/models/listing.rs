use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::AppError;
use crate::features::marketplace::dtos::ListingResponseDto;

/// Listing category enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "listing_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ListingCategory {
    /// Cameras, lighting, audio equipment
    Gear,
    /// Studios, venues, outdoor spaces
    Location,
    /// Professional services and expertise
    Service,
}

impl fmt::Display for ListingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingCategory::Gear => write!(f, "gear"),
            ListingCategory::Location => write!(f, "location"),
            ListingCategory::Service => write!(f, "service"),
        }
    }
}

impl FromStr for ListingCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gear" => Ok(ListingCategory::Gear),
            "location" => Ok(ListingCategory::Location),
            "service" => Ok(ListingCategory::Service),
            other => Err(AppError::Validation(format!("Unknown category: {}", other))),
        }
    }
}

/// Database model for a marketplace listing
#[derive(Debug, Clone, FromRow)]
pub struct Listing {
    pub id: Uuid,
    pub category: ListingCategory,
    pub title: String,
    pub description: String,
    /// Free-form price, e.g. "$150/day"
    pub rate: String,
    pub location: String,
    /// Photo URLs
    pub photos: Vec<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sanitized values written when a listing is created
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub category: ListingCategory,
    pub title: String,
    pub description: String,
    pub rate: String,
    pub location: String,
    pub photos: Vec<String>,
}

impl From<Listing> for ListingResponseDto {
    fn from(l: Listing) -> Self {
        Self {
            id: l.id,
            category: l.category,
            title: l.title,
            description: l.description,
            rate: l.rate,
            location: l.location,
            photos: l.photos,
            created_by: l.created_by,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}
