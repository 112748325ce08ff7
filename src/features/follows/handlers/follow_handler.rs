use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::auth::session::Session;
use crate::features::follows::dtos::{FollowCountsDto, FollowResultDto, FollowStatusDto};
use crate::features::follows::services::FollowService;
use crate::shared::types::ApiResponse;

#[utoipa::path(
    post,
    path = "/api/follows/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "User to follow")
    ),
    responses(
        (status = 200, description = "Following", body = ApiResponse<FollowResultDto>),
        (status = 400, description = "Cannot follow yourself"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    tag = "follows",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn follow_user(
    session: Session,
    State(service): State<Arc<FollowService>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<FollowResultDto>>> {
    let result = service.follow(&session, user_id).await?;
    Ok(Json(ApiResponse::success(Some(result), None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/follows/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "User to unfollow")
    ),
    responses(
        (status = 200, description = "Unfollowed"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "follows",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn unfollow_user(
    session: Session,
    State(service): State<Arc<FollowService>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.unfollow(&session, user_id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Unfollowed".to_string()),
        None,
    )))
}

#[utoipa::path(
    get,
    path = "/api/follows/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "User to check")
    ),
    responses(
        (status = 200, description = "Whether the caller follows the user", body = ApiResponse<FollowStatusDto>)
    ),
    tag = "follows",
    security(
        (),
        ("bearer_auth" = [])
    )
)]
pub async fn get_follow_status(
    session: Session,
    State(service): State<Arc<FollowService>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<FollowStatusDto>>> {
    let status = service.is_following(&session, user_id).await?;
    Ok(Json(ApiResponse::success(Some(status), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/follows/{user_id}/counts",
    params(
        ("user_id" = Uuid, Path, description = "Profile id")
    ),
    responses(
        (status = 200, description = "Follower and following totals", body = ApiResponse<FollowCountsDto>)
    ),
    tag = "follows"
)]
pub async fn get_follow_counts(
    State(service): State<Arc<FollowService>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<FollowCountsDto>>> {
    let counts = service.counts(user_id).await?;
    Ok(Json(ApiResponse::success(Some(counts), None, None)))
}
