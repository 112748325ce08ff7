use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::posts::models::Post;

/// Storage access for posts
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn insert(&self, author_id: Uuid, body: &str) -> Result<Post>;

    /// Newest first
    async fn list_by_author(&self, author_id: Uuid, limit: i64) -> Result<Vec<Post>>;

    /// Newest first, across all `author_ids`
    async fn list_by_authors(&self, author_ids: &[Uuid], limit: i64) -> Result<Vec<Post>>;
}

/// Postgres-backed post repository
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn insert(&self, author_id: Uuid, body: &str) -> Result<Post> {
        sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (id, author_id, body)
            VALUES ($1, $2, $3)
            RETURNING id, author_id, body, created_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(author_id)
        .bind(body)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create post: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list_by_author(&self, author_id: Uuid, limit: i64) -> Result<Vec<Post>> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, body, created_at
            FROM posts
            WHERE author_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(author_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch posts: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list_by_authors(&self, author_ids: &[Uuid], limit: i64) -> Result<Vec<Post>> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, body, created_at
            FROM posts
            WHERE author_id = ANY($1)
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(author_ids)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch feed posts: {:?}", e);
            AppError::Database(e)
        })
    }
}
