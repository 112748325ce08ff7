use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::messages::models::Message;

/// Storage access for direct messages. Messages are never updated or deleted.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Every message `user_id` sent or received, newest first
    async fn list_involving(&self, user_id: Uuid) -> Result<Vec<Message>>;

    /// Every message exchanged between `a` and `b`, oldest first
    async fn list_between(&self, a: Uuid, b: Uuid) -> Result<Vec<Message>>;

    async fn insert(&self, sender_id: Uuid, recipient_id: Uuid, body: &str) -> Result<Message>;
}

/// Postgres-backed message repository
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    async fn list_involving(&self, user_id: Uuid) -> Result<Vec<Message>> {
        sqlx::query_as::<_, Message>(
            r#"
            SELECT id, sender_id, recipient_id, body, created_at
            FROM messages
            WHERE sender_id = $1 OR recipient_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch messages: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list_between(&self, a: Uuid, b: Uuid) -> Result<Vec<Message>> {
        sqlx::query_as::<_, Message>(
            r#"
            SELECT id, sender_id, recipient_id, body, created_at
            FROM messages
            WHERE (sender_id = $1 AND recipient_id = $2)
               OR (sender_id = $2 AND recipient_id = $1)
            ORDER BY created_at ASC
            "#,
        )
        .bind(a)
        .bind(b)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch thread messages: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn insert(&self, sender_id: Uuid, recipient_id: Uuid, body: &str) -> Result<Message> {
        sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (id, sender_id, recipient_id, body)
            VALUES ($1, $2, $3, $4)
            RETURNING id, sender_id, recipient_id, body, created_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(sender_id)
        .bind(recipient_id)
        .bind(body)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to send message: {:?}", e);
            AppError::Database(e)
        })
    }
}
