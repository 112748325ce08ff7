use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::session::Session;
use crate::features::messages::dtos::{MessageDto, SendMessageDto, ThreadDetailDto, ThreadDto};
use crate::features::messages::services::MessageService;
use crate::shared::types::{ApiResponse, Meta};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

/// List the current user's conversations
#[utoipa::path(
    get,
    path = "/api/messages/threads",
    responses(
        (status = 200, description = "Threads, most recent first (empty when anonymous)", body = ApiResponse<Vec<ThreadDto>>)
    ),
    tag = "messages",
    security(
        (),
        ("bearer_auth" = [])
    )
)]
pub async fn list_threads(
    session: Session,
    State(service): State<Arc<MessageService>>,
) -> Result<Json<ApiResponse<Vec<ThreadDto>>>> {
    let threads = service.list_threads(&session).await?;
    let total = threads.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(threads),
        None,
        Some(Meta { total }),
    )))
}

/// Full conversation with one counterpart
#[utoipa::path(
    get,
    path = "/api/messages/threads/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "Counterpart user id")
    ),
    responses(
        (status = 200, description = "Counterpart and messages, oldest first", body = ApiResponse<ThreadDetailDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    tag = "messages",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_thread(
    session: Session,
    State(service): State<Arc<MessageService>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ThreadDetailDto>>> {
    let detail = service.get_thread_with(&session, user_id).await?;
    Ok(Json(ApiResponse::success(Some(detail), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/messages",
    request_body = SendMessageDto,
    responses(
        (status = 201, description = "Message sent", body = ApiResponse<MessageDto>),
        (status = 400, description = "Empty or too long"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Recipient not found")
    ),
    tag = "messages",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn send_message(
    session: Session,
    State(service): State<Arc<MessageService>>,
    AppJson(dto): AppJson<SendMessageDto>,
) -> Result<(StatusCode, Json<ApiResponse<MessageDto>>)> {
    let message = service.send_message(&session, &dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(message),
            Some("Message sent".to_string()),
            None,
        )),
    ))
}
