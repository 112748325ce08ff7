use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::projects::dtos::ProjectResponseDto;

/// Database model for a project posting
#[derive(Debug, Clone, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub role_needed: String,
    pub location: String,
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

/// Sanitized values written when a project is posted
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub role_needed: String,
    pub location: String,
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
}

/// Optional filters for the project board; `None` means "no constraint"
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    /// Substring of title, description or genre
    pub query: Option<String>,
    pub role_needed: Option<String>,
    /// Substring of location
    pub location: Option<String>,
    pub pay_status: Option<String>,
    pub project_type: Option<String>,
    /// Projects whose minimum day rate is at least this much
    pub min_day_rate: Option<i32>,
}

impl From<Project> for ProjectResponseDto {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            title: p.title,
            description: p.description,
            role_needed: p.role_needed,
            location: p.location,
            pay_status: p.pay_status,
            min_day_rate: p.min_day_rate,
            max_day_rate: p.max_day_rate,
            start_date: p.start_date,
            end_date: p.end_date,
            project_type: p.project_type,
            genre: p.genre,
            budget_range: p.budget_range,
            crew_size: p.crew_size,
            requirements: p.requirements,
            created_by: p.created_by,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
