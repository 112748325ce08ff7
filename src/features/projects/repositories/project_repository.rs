use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::contains_pattern;
use crate::core::error::{AppError, Result};
use crate::features::projects::models::{NewProject, Project, ProjectFilter};

const PROJECT_COLUMNS: &str = "id, title, description, role_needed, location, pay_status, \
     min_day_rate, max_day_rate, start_date, end_date, project_type, genre, budget_range, \
     crew_size, requirements, created_by, created_at, updated_at";

/// Storage access for project postings
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn insert(&self, created_by: Uuid, project: &NewProject) -> Result<Project>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>>;

    /// Newest first
    async fn list(&self, filter: &ProjectFilter, limit: i64) -> Result<Vec<Project>>;
}

/// Postgres-backed project repository
pub struct PgProjectRepository {
    pool: PgPool,
}

impl PgProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PgProjectRepository {
    async fn insert(&self, created_by: Uuid, project: &NewProject) -> Result<Project> {
        let sql = format!(
            r#"
            INSERT INTO projects (
                id, title, description, role_needed, location, pay_status,
                min_day_rate, max_day_rate, start_date, end_date, project_type,
                genre, budget_range, crew_size, requirements, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {}
            "#,
            PROJECT_COLUMNS
        );

        sqlx::query_as::<_, Project>(&sql)
            .bind(Uuid::now_v7())
            .bind(&project.title)
            .bind(&project.description)
            .bind(&project.role_needed)
            .bind(&project.location)
            .bind(&project.pay_status)
            .bind(project.min_day_rate)
            .bind(project.max_day_rate)
            .bind(project.start_date)
            .bind(project.end_date)
            .bind(&project.project_type)
            .bind(&project.genre)
            .bind(&project.budget_range)
            .bind(project.crew_size)
            .bind(&project.requirements)
            .bind(created_by)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create project: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>> {
        let sql = format!("SELECT {} FROM projects WHERE id = $1", PROJECT_COLUMNS);
        sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get project {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn list(&self, filter: &ProjectFilter, limit: i64) -> Result<Vec<Project>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM projects
            WHERE ($1::text IS NULL OR title ILIKE $1 OR description ILIKE $1 OR genre ILIKE $1)
              AND ($2::text IS NULL OR role_needed = $2)
              AND ($3::text IS NULL OR location ILIKE $3)
              AND ($4::text IS NULL OR pay_status = $4)
              AND ($5::text IS NULL OR project_type = $5)
              AND ($6::int IS NULL OR min_day_rate >= $6)
            ORDER BY created_at DESC
            LIMIT $7
            "#,
            PROJECT_COLUMNS
        );

        sqlx::query_as::<_, Project>(&sql)
            .bind(contains_pattern(&filter.query))
            .bind(&filter.role_needed)
            .bind(contains_pattern(&filter.location))
            .bind(&filter.pay_status)
            .bind(&filter.project_type)
            .bind(filter.min_day_rate)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list projects: {:?}", e);
                AppError::Database(e)
            })
    }
}
