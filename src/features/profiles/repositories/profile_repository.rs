use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::{contains_pattern, is_unique_violation};
use crate::core::error::{AppError, Result};
use crate::features::profiles::models::{Profile, ProfileSummary, ProfileUpdate, TopFilm};

const PROFILE_COLUMNS: &str = "id, full_name, handle, role, bio, location, skills, top_films, \
     rating, ratings_count, created_at, updated_at";

/// Optional filters for profile search; `None` means "no constraint"
#[derive(Debug, Clone, Default)]
pub struct ProfileFilter {
    pub query: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
}

/// Storage access for profiles
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>>;

    async fn find_by_handle(&self, handle: &str) -> Result<Option<Profile>>;

    async fn find_summary(&self, id: Uuid) -> Result<Option<ProfileSummary>>;

    /// Summaries for every id that exists; missing ids are simply absent
    async fn find_summaries(&self, ids: &[Uuid]) -> Result<Vec<ProfileSummary>>;

    /// Summaries keyed by id. A failed lookup degrades to an empty map so
    /// callers fall back to placeholder display data.
    async fn summaries_by_id(&self, ids: &[Uuid]) -> HashMap<Uuid, ProfileSummary> {
        if ids.is_empty() {
            return HashMap::new();
        }

        match self.find_summaries(ids).await {
            Ok(summaries) => summaries.into_iter().map(|s| (s.id, s)).collect(),
            Err(e) => {
                tracing::warn!("Profile lookup failed for {} ids: {:?}", ids.len(), e);
                HashMap::new()
            }
        }
    }

    /// Whether a profile other than `exclude_id` holds `handle`
    async fn is_handle_taken(&self, handle: &str, exclude_id: Uuid) -> Result<bool>;

    /// Creates the row on first save, updates it afterwards
    async fn upsert(&self, id: Uuid, update: &ProfileUpdate) -> Result<Profile>;

    async fn update_top_films(&self, id: Uuid, films: &[TopFilm]) -> Result<Option<Profile>>;

    async fn search(
        &self,
        filter: &ProfileFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Profile>, i64)>;
}

/// Postgres-backed profile repository
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>> {
        let sql = format!("SELECT {} FROM profiles WHERE id = $1", PROFILE_COLUMNS);
        sqlx::query_as::<_, Profile>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get profile {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn find_by_handle(&self, handle: &str) -> Result<Option<Profile>> {
        let sql = format!("SELECT {} FROM profiles WHERE handle = $1", PROFILE_COLUMNS);
        sqlx::query_as::<_, Profile>(&sql)
            .bind(handle)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get profile by handle: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_summary(&self, id: Uuid) -> Result<Option<ProfileSummary>> {
        sqlx::query_as::<_, ProfileSummary>(
            "SELECT id, full_name, handle FROM profiles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_summaries(&self, ids: &[Uuid]) -> Result<Vec<ProfileSummary>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, ProfileSummary>(
            "SELECT id, full_name, handle FROM profiles WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn is_handle_taken(&self, handle: &str, exclude_id: Uuid) -> Result<bool> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM profiles WHERE handle = $1 AND id <> $2)",
        )
        .bind(handle)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Error checking handle availability: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(taken)
    }

    async fn upsert(&self, id: Uuid, update: &ProfileUpdate) -> Result<Profile> {
        let sql = format!(
            r#"
            INSERT INTO profiles (id, full_name, handle, role, bio, location, skills)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                handle = EXCLUDED.handle,
                role = EXCLUDED.role,
                bio = EXCLUDED.bio,
                location = EXCLUDED.location,
                skills = EXCLUDED.skills,
                updated_at = NOW()
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        );

        sqlx::query_as::<_, Profile>(&sql)
            .bind(id)
            .bind(&update.full_name)
            .bind(&update.handle)
            .bind(&update.role)
            .bind(&update.bio)
            .bind(&update.location)
            .bind(&update.skills)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    return AppError::Conflict("Handle is already taken".to_string());
                }
                tracing::error!("Failed to update profile {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn update_top_films(&self, id: Uuid, films: &[TopFilm]) -> Result<Option<Profile>> {
        let sql = format!(
            "UPDATE profiles SET top_films = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            PROFILE_COLUMNS
        );

        sqlx::query_as::<_, Profile>(&sql)
            .bind(id)
            .bind(Json(films))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update top films for {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn search(
        &self,
        filter: &ProfileFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Profile>, i64)> {
        let query = contains_pattern(&filter.query);
        let role = contains_pattern(&filter.role);
        let location = contains_pattern(&filter.location);

        const WHERE_CLAUSE: &str = r#"
            WHERE ($1::text IS NULL OR full_name ILIKE $1 OR handle ILIKE $1)
              AND ($2::text IS NULL OR role ILIKE $2)
              AND ($3::text IS NULL OR location ILIKE $3)
        "#;

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM profiles {}",
            WHERE_CLAUSE
        ))
        .bind(&query)
        .bind(&role)
        .bind(&location)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let sql = format!(
            "SELECT {} FROM profiles {} ORDER BY full_name, id LIMIT $4 OFFSET $5",
            PROFILE_COLUMNS, WHERE_CLAUSE
        );
        let profiles = sqlx::query_as::<_, Profile>(&sql)
            .bind(&query)
            .bind(&role)
            .bind(&location)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to search profiles: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((profiles, total))
    }
}
