use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::projects::models::ProjectFilter;
use crate::shared::validation::non_blank;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectResponseDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Crew role the production is hiring for, e.g. "Gaffer"
    pub role_needed: String,
    pub location: String,
    /// "paid", "unpaid" or "deferred"
    pub pay_status: Option<String>,
    pub min_day_rate: Option<i32>,
    pub max_day_rate: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub project_type: Option<String>,
    pub genre: Option<String>,
    pub budget_range: Option<String>,
    pub crew_size: Option<i32>,
    pub requirements: Vec<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for posting a project
///
/// The four required text fields default to empty so the service can
/// report the first missing one by name.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProjectDto {
    #[validate(length(max = 200, message = "Title must not exceed 200 characters"))]
    #[serde(default)]
    pub title: String,

    #[validate(length(max = 5000, message = "Description must not exceed 5000 characters"))]
    #[serde(default)]
    pub description: String,

    #[validate(length(max = 80, message = "Role must not exceed 80 characters"))]
    #[serde(default)]
    pub role_needed: String,

    #[validate(length(max = 120, message = "Location must not exceed 120 characters"))]
    #[serde(default)]
    pub location: String,

    #[serde(default)]
    pub pay_status: Option<String>,

    #[validate(range(min = 0, message = "Day rate cannot be negative"))]
    #[serde(default)]
    pub min_day_rate: Option<i32>,

    #[validate(range(min = 0, message = "Day rate cannot be negative"))]
    #[serde(default)]
    pub max_day_rate: Option<i32>,

    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub project_type: Option<String>,

    #[serde(default)]
    pub genre: Option<String>,

    #[serde(default)]
    pub budget_range: Option<String>,

    #[validate(range(min = 1, message = "Crew size must be at least 1"))]
    #[serde(default)]
    pub crew_size: Option<i32>,

    #[validate(length(max = 20, message = "At most 20 requirements are allowed"))]
    #[serde(default)]
    pub requirements: Option<Vec<String>>,
}

/// Query parameters for the project board
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ProjectListQuery {
    /// Case-insensitive match on title, description or genre
    pub q: Option<String>,
    /// Exact crew role
    pub role_needed: Option<String>,
    /// Case-insensitive match on location
    pub location: Option<String>,
    /// Exact pay status
    pub pay_status: Option<String>,
    /// Minimum day rate the project must offer
    pub min_day_rate: Option<i32>,
    /// Exact project type
    pub project_type: Option<String>,
}

impl From<ProjectListQuery> for ProjectFilter {
    fn from(q: ProjectListQuery) -> Self {
        Self {
            query: non_blank(q.q),
            role_needed: non_blank(q.role_needed),
            location: non_blank(q.location),
            pay_status: non_blank(q.pay_status),
            project_type: non_blank(q.project_type),
            min_day_rate: q.min_day_rate,
        }
    }
}
