use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::follows::dtos::FollowCountsDto;

/// Database model for a follow edge
#[derive(Debug, Clone, FromRow)]
pub struct Follow {
    pub follower_id: Uuid,
    pub followee_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow)]
pub struct FollowCounts {
    pub followers: i64,
    pub following: i64,
}

impl From<FollowCounts> for FollowCountsDto {
    fn from(c: FollowCounts) -> Self {
        Self {
            followers: c.followers,
            following: c.following,
        }
    }
}
