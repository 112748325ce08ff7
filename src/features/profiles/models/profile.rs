use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::profiles::dtos::{ProfileResponseDto, ProfileSummaryDto, TopFilmDto};
use crate::shared::constants::{UNKNOWN_USER_HANDLE, UNKNOWN_USER_NAME};

/// Database model for a profile
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: String,
    pub handle: Option<String>,
    pub role: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub top_films: Json<Vec<TopFilm>>,
    pub rating: Option<f64>,
    pub ratings_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stored shape of a top-film entry (JSONB)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopFilm {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

/// The display subset of a profile
#[derive(Debug, Clone, FromRow)]
pub struct ProfileSummary {
    pub id: Uuid,
    pub full_name: String,
    pub handle: Option<String>,
}

impl ProfileSummary {
    /// Name to show, falling back to the placeholder for blank names
    pub fn display_name(&self) -> String {
        if self.full_name.trim().is_empty() {
            UNKNOWN_USER_NAME.to_string()
        } else {
            self.full_name.clone()
        }
    }

    pub fn display_handle(&self) -> String {
        self.handle
            .as_deref()
            .filter(|h| !h.is_empty())
            .unwrap_or(UNKNOWN_USER_HANDLE)
            .to_string()
    }
}

/// Sanitized values written by a profile update
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub handle: String,
    pub role: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub skills: Vec<String>,
}

impl From<TopFilm> for TopFilmDto {
    fn from(f: TopFilm) -> Self {
        Self {
            title: f.title,
            year: f.year,
        }
    }
}

impl From<Profile> for ProfileResponseDto {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            full_name: p.full_name,
            handle: p.handle,
            role: p.role,
            bio: p.bio,
            location: p.location,
            skills: p.skills,
            top_films: p.top_films.0.into_iter().map(Into::into).collect(),
            rating: p.rating,
            ratings_count: p.ratings_count,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<ProfileSummary> for ProfileSummaryDto {
    fn from(s: ProfileSummary) -> Self {
        Self {
            full_name: s.display_name(),
            handle: s.display_handle(),
            id: s.id,
        }
    }
}

impl ProfileSummaryDto {
    /// Placeholder used when the profile behind `id` cannot be resolved
    pub fn placeholder(id: Uuid) -> Self {
        Self {
            id,
            full_name: UNKNOWN_USER_NAME.to_string(),
            handle: UNKNOWN_USER_HANDLE.to_string(),
        }
    }
}
