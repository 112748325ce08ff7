use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::session::Session;
use crate::features::marketplace::dtos::{CreateListingDto, ListingListQuery, ListingResponseDto};
use crate::features::marketplace::services::ListingService;
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
    path = "/api/marketplace",
    params(ListingListQuery),
    responses(
        (status = 200, description = "Newest listings", body = ApiResponse<Vec<ListingResponseDto>>),
        (status = 400, description = "Unknown category")
    ),
    tag = "marketplace"
)]
pub async fn list_listings(
    State(service): State<Arc<ListingService>>,
    Query(query): Query<ListingListQuery>,
) -> Result<Json<ApiResponse<Vec<ListingResponseDto>>>> {
    let listings = service.list_listings(query.category()?).await?;
    let total = listings.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(listings),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    get,
    path = "/api/marketplace/{id}",
    params(
        ("id" = Uuid, Path, description = "Listing id")
    ),
    responses(
        (status = 200, description = "Listing found", body = ApiResponse<ListingResponseDto>),
        (status = 404, description = "Listing not found")
    ),
    tag = "marketplace"
)]
pub async fn get_listing(
    State(service): State<Arc<ListingService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ListingResponseDto>>> {
    let listing = service.get_listing(id).await?;
    Ok(Json(ApiResponse::success(Some(listing), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/marketplace",
    request_body = CreateListingDto,
    responses(
        (status = 201, description = "Listing created", body = ApiResponse<ListingResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "marketplace",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_listing(
    session: Session,
    State(service): State<Arc<ListingService>>,
    AppJson(dto): AppJson<CreateListingDto>,
) -> Result<(StatusCode, Json<ApiResponse<ListingResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let listing = service.create_listing(&session, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(listing),
            Some("Listing created".to_string()),
            None,
        )),
    ))
}
