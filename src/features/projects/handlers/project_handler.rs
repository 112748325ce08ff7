use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::session::Session;
use crate::features::projects::dtos::{CreateProjectDto, ProjectListQuery, ProjectResponseDto};
use crate::features::projects::services::ProjectService;
use crate::shared::types::{ApiResponse, Meta};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[utoipa::path(
    get,
    path = "/api/projects",
    params(ProjectListQuery),
    responses(
        (status = 200, description = "Newest matching postings", body = ApiResponse<Vec<ProjectResponseDto>>)
    ),
    tag = "projects"
)]
pub async fn list_projects(
    State(service): State<Arc<ProjectService>>,
    Query(query): Query<ProjectListQuery>,
) -> Result<Json<ApiResponse<Vec<ProjectResponseDto>>>> {
    let projects = service.list_projects(&query.into()).await?;
    let total = projects.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(projects),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(
        ("id" = Uuid, Path, description = "Project id")
    ),
    responses(
        (status = 200, description = "Project found", body = ApiResponse<ProjectResponseDto>),
        (status = 404, description = "Project not found")
    ),
    tag = "projects"
)]
pub async fn get_project(
    State(service): State<Arc<ProjectService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProjectResponseDto>>> {
    let project = service.get_project(id).await?;
    Ok(Json(ApiResponse::success(Some(project), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProjectDto,
    responses(
        (status = 201, description = "Project posted", body = ApiResponse<ProjectResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "projects",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_project(
    session: Session,
    State(service): State<Arc<ProjectService>>,
    AppJson(dto): AppJson<CreateProjectDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProjectResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let project = service.create_project(&session, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(project),
            Some("Project posted".to_string()),
            None,
        )),
    ))
}
