use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::is_unique_violation;
use crate::core::error::{AppError, Result};
use crate::features::follows::models::{Follow, FollowCounts};

/// Storage access for follow edges
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Inserts the edge; returns `false` when it already existed
    async fn insert(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool>;

    /// Removes the edge; returns `false` when there was nothing to remove
    async fn delete(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool>;

    async fn exists(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool>;

    /// Ids of every profile `follower_id` follows
    async fn followee_ids(&self, follower_id: Uuid) -> Result<Vec<Uuid>>;

    /// Ids of every profile following `followee_id`
    async fn follower_ids(&self, followee_id: Uuid) -> Result<Vec<Uuid>>;

    async fn counts(&self, user_id: Uuid) -> Result<FollowCounts>;
}

/// Postgres-backed follow repository
pub struct PgFollowRepository {
    pool: PgPool,
}

impl PgFollowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowRepository for PgFollowRepository {
    async fn insert(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        let result = sqlx::query_as::<_, Follow>(
            r#"
            INSERT INTO follows (follower_id, followee_id)
            VALUES ($1, $2)
            RETURNING follower_id, followee_id, created_at
            "#,
        )
        .bind(follower_id)
        .bind(followee_id)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(follow) => {
                tracing::debug!(
                    "Follow edge created at {}: {} -> {}",
                    follow.created_at,
                    follow.follower_id,
                    follow.followee_id
                );
                Ok(true)
            }
            Err(e) if is_unique_violation(&e) => Ok(false),
            Err(e) => {
                tracing::error!("Failed to follow user: {:?}", e);
                Err(AppError::Database(e))
            }
        }
    }

    async fn delete(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND followee_id = $2")
                .bind(follower_id)
                .bind(followee_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to unfollow user: {:?}", e);
                    AppError::Database(e)
                })?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND followee_id = $2)",
        )
        .bind(follower_id)
        .bind(followee_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn followee_ids(&self, follower_id: Uuid) -> Result<Vec<Uuid>> {
        sqlx::query_scalar("SELECT followee_id FROM follows WHERE follower_id = $1")
            .bind(follower_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn follower_ids(&self, followee_id: Uuid) -> Result<Vec<Uuid>> {
        sqlx::query_scalar("SELECT follower_id FROM follows WHERE followee_id = $1")
            .bind(followee_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn counts(&self, user_id: Uuid) -> Result<FollowCounts> {
        sqlx::query_as::<_, FollowCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM follows WHERE followee_id = $1) AS followers,
                (SELECT COUNT(*) FROM follows WHERE follower_id = $1) AS following
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
