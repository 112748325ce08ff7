use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::profiles::dtos::ProfileSummaryDto;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostResponseDto {
    pub id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for publishing a post.
///
/// Length is enforced after trimming, in the service.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePostDto {
    pub body: String,
}

/// A post together with its author's display data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedItemDto {
    pub id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub author: ProfileSummaryDto,
}
