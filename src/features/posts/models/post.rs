use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::posts::dtos::{FeedItemDto, PostResponseDto};
use crate::features::profiles::dtos::ProfileSummaryDto;

/// Database model for a post
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn into_feed_item(self, author: ProfileSummaryDto) -> FeedItemDto {
        FeedItemDto {
            id: self.id,
            body: self.body,
            created_at: self.created_at,
            author,
        }
    }
}

impl From<Post> for PostResponseDto {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            author_id: p.author_id,
            body: p.body,
            created_at: p.created_at,
        }
    }
}
