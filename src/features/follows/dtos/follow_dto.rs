use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Outcome of a follow request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FollowResultDto {
    pub followee_id: Uuid,
    /// True when the edge already existed before this request
    pub already_following: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FollowStatusDto {
    pub followee_id: Uuid,
    pub following: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FollowCountsDto {
    pub followers: i64,
    pub following: i64,
}
