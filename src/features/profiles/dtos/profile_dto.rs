use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::auth::model::AuthenticatedUser;
use crate::shared::types::PaginationQuery;

/// Public profile representation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponseDto {
    pub id: Uuid,
    pub full_name: String,
    pub handle: Option<String>,
    /// Primary crew role, e.g. "Gaffer" or "Director of Photography"
    pub role: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub top_films: Vec<TopFilmDto>,
    pub rating: Option<f64>,
    pub ratings_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Display data for authors and conversation counterparts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProfileSummaryDto {
    pub id: Uuid,
    pub full_name: String,
    pub handle: String,
}

/// Current identity plus the profile row, if one exists yet
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MeResponseDto {
    pub user: Option<AuthenticatedUser>,
    pub profile: Option<ProfileResponseDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TopFilmDto {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

/// Request DTO for saving the "top films" module
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaveTopFilmsDto {
    pub films: Vec<TopFilmDto>,
}

/// Request DTO for updating the current user's profile
///
/// Required-field and handle-format rules are enforced by the service so
/// that the first failing rule produces the error message.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[validate(length(max = 120, message = "Full name must not exceed 120 characters"))]
    pub full_name: String,

    pub handle: String,

    #[validate(length(max = 80, message = "Role must not exceed 80 characters"))]
    pub role: String,

    #[validate(length(max = 2000, message = "Bio must not exceed 2000 characters"))]
    #[serde(default)]
    pub bio: Option<String>,

    #[validate(length(max = 120, message = "Location must not exceed 120 characters"))]
    #[serde(default)]
    pub location: Option<String>,

    #[validate(length(max = 30, message = "At most 30 skills are allowed"))]
    #[serde(default)]
    pub skills: Option<Vec<String>>,
}

/// Query parameters for searching profiles
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ProfileSearchQuery {
    /// Case-insensitive match on name or handle
    pub q: Option<String>,
    /// Case-insensitive match on role
    pub role: Option<String>,
    /// Case-insensitive match on location
    pub location: Option<String>,
    /// Page number (1-indexed, default: 1)
    #[param(minimum = 1)]
    pub page: Option<i64>,
    /// Number of items per page (default: 20, max: 100)
    #[param(minimum = 1, maximum = 100)]
    pub page_size: Option<i64>,
}

impl ProfileSearchQuery {
    pub fn pagination(&self) -> PaginationQuery {
        let defaults = PaginationQuery::default();
        PaginationQuery {
            page: self.page.unwrap_or(defaults.page),
            page_size: self.page_size.unwrap_or(defaults.page_size),
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct HandleAvailabilityQuery {
    pub handle: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HandleAvailabilityDto {
    pub handle: String,
    pub available: bool,
}
