use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::session::Session;
use crate::features::posts::dtos::{CreatePostDto, FeedItemDto, PostResponseDto};
use crate::features::posts::services::PostService;
use crate::shared::types::{ApiResponse, Meta};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = ApiResponse<PostResponseDto>),
        (status = 400, description = "Empty or too long"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "posts",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_post(
    session: Session,
    State(service): State<Arc<PostService>>,
    AppJson(dto): AppJson<CreatePostDto>,
) -> Result<(StatusCode, Json<ApiResponse<PostResponseDto>>)> {
    let post = service.create_post(&session, &dto.body).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(post),
            Some("Post created".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/posts/user/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "Author id")
    ),
    responses(
        (status = 200, description = "Latest posts, newest first", body = ApiResponse<Vec<PostResponseDto>>)
    ),
    tag = "posts"
)]
pub async fn list_user_posts(
    State(service): State<Arc<PostService>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<PostResponseDto>>>> {
    let posts = service.list_user_posts(user_id).await?;
    let total = posts.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(posts),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    get,
    path = "/api/feed",
    responses(
        (status = 200, description = "Latest posts by followed users (empty when anonymous)", body = ApiResponse<Vec<FeedItemDto>>)
    ),
    tag = "posts",
    security(
        (),
        ("bearer_auth" = [])
    )
)]
pub async fn get_feed(
    session: Session,
    State(service): State<Arc<PostService>>,
) -> Result<Json<ApiResponse<Vec<FeedItemDto>>>> {
    let feed = service.followers_feed(&session).await?;
    Ok(Json(ApiResponse::success(Some(feed), None, None)))
}
