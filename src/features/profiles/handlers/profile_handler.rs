use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::session::Session;
use crate::features::profiles::dtos::{
    HandleAvailabilityDto, HandleAvailabilityQuery, MeResponseDto, ProfileResponseDto,
    ProfileSearchQuery, SaveTopFilmsDto, TopFilmDto, UpdateProfileDto,
};
use crate::features::profiles::services::ProfileService;
use crate::shared::types::{ApiResponse, Meta};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[utoipa::path(
    get,
    path = "/api/profiles",
    params(ProfileSearchQuery),
    responses(
        (status = 200, description = "Matching profiles", body = ApiResponse<Vec<ProfileResponseDto>>)
    ),
    tag = "profiles"
)]
pub async fn search_profiles(
    State(service): State<Arc<ProfileService>>,
    Query(query): Query<ProfileSearchQuery>,
) -> Result<Json<ApiResponse<Vec<ProfileResponseDto>>>> {
    let (profiles, total) = service.search(&query).await?;
    Ok(Json(ApiResponse::success(
        Some(profiles),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    get,
    path = "/api/profiles/me",
    responses(
        (status = 200, description = "Current user and profile (both null when anonymous)", body = ApiResponse<MeResponseDto>)
    ),
    tag = "profiles",
    security(
        (),
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(
    session: Session,
    State(service): State<Arc<ProfileService>>,
) -> Result<Json<ApiResponse<MeResponseDto>>> {
    let me = service.get_me(&session).await?;
    Ok(Json(ApiResponse::success(Some(me), None, None)))
}

#[utoipa::path(
    put,
    path = "/api/profiles/me",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated successfully", body = ApiResponse<ProfileResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Handle already taken")
    ),
    tag = "profiles",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_profile(
    session: Session,
    State(service): State<Arc<ProfileService>>,
    AppJson(dto): AppJson<UpdateProfileDto>,
) -> Result<Json<ApiResponse<ProfileResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let profile = service.update_profile(&session, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(profile),
        Some("Profile updated successfully".to_string()),
        None,
    )))
}

#[utoipa::path(
    put,
    path = "/api/profiles/me/top-films",
    request_body = SaveTopFilmsDto,
    responses(
        (status = 200, description = "Top films saved", body = ApiResponse<Vec<TopFilmDto>>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Profile not found")
    ),
    tag = "profiles",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn save_top_films(
    session: Session,
    State(service): State<Arc<ProfileService>>,
    AppJson(dto): AppJson<SaveTopFilmsDto>,
) -> Result<Json<ApiResponse<Vec<TopFilmDto>>>> {
    let films = service.save_top_films(&session, dto.films).await?;
    Ok(Json(ApiResponse::success(
        Some(films),
        Some("Top films saved".to_string()),
        None,
    )))
}

#[utoipa::path(
    get,
    path = "/api/profiles/handle-availability",
    params(HandleAvailabilityQuery),
    responses(
        (status = 200, description = "Availability of the handle", body = ApiResponse<HandleAvailabilityDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "profiles",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn check_handle_availability(
    session: Session,
    State(service): State<Arc<ProfileService>>,
    Query(query): Query<HandleAvailabilityQuery>,
) -> Result<Json<ApiResponse<HandleAvailabilityDto>>> {
    let available = service
        .check_handle_availability(&session, &query.handle)
        .await?;
    Ok(Json(ApiResponse::success(
        Some(HandleAvailabilityDto {
            handle: query.handle,
            available,
        }),
        None,
        None,
    )))
}

#[utoipa::path(
    get,
    path = "/api/profiles/{handle}",
    params(
        ("handle" = String, Path, description = "Profile handle")
    ),
    responses(
        (status = 200, description = "Profile", body = ApiResponse<ProfileResponseDto>),
        (status = 404, description = "Profile not found")
    ),
    tag = "profiles"
)]
pub async fn get_profile_by_handle(
    State(service): State<Arc<ProfileService>>,
    Path(handle): Path<String>,
) -> Result<Json<ApiResponse<ProfileResponseDto>>> {
    let profile = service.get_by_handle(&handle).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/profiles/id/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "Profile id")
    ),
    responses(
        (status = 200, description = "Profile", body = ApiResponse<ProfileResponseDto>),
        (status = 404, description = "Profile not found")
    ),
    tag = "profiles"
)]
pub async fn get_profile_by_id(
    State(service): State<Arc<ProfileService>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProfileResponseDto>>> {
    let profile = service.get_by_id(user_id).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}
