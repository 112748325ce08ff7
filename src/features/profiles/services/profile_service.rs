use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::session::Session;
use crate::features::profiles::dtos::{
    MeResponseDto, ProfileResponseDto, ProfileSearchQuery, TopFilmDto, UpdateProfileDto,
};
use crate::features::profiles::models::{ProfileUpdate, TopFilm};
use crate::features::profiles::repositories::{ProfileFilter, ProfileRepository};
use crate::shared::constants::{
    MAX_FILM_TITLE_LENGTH, MAX_FILM_YEAR, MAX_TOP_FILMS, MIN_FILM_YEAR,
};
use crate::shared::validation::{char_len, non_blank, HANDLE_REGEX};

const MIN_HANDLE_LENGTH: usize = 3;
const MAX_HANDLE_LENGTH: usize = 20;

/// Service for profile reads and self-service edits
pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// Current user and their profile row.
    ///
    /// Anonymous sessions get an empty response; a missing or unreadable
    /// profile row yields `profile: None` rather than an error.
    pub async fn get_me(&self, session: &Session) -> Result<MeResponseDto> {
        let Some(user) = session.user() else {
            return Ok(MeResponseDto {
                user: None,
                profile: None,
            });
        };

        let profile = match self.profiles.find_by_id(user.user_id).await {
            Ok(profile) => profile.map(Into::into),
            Err(e) if e.is_backend_unavailable() => {
                tracing::error!("Profile lookup failed for {}: {:?}", user.user_id, e);
                None
            }
            Err(e) => return Err(e),
        };

        Ok(MeResponseDto {
            user: Some(user.clone()),
            profile,
        })
    }

    pub async fn get_by_handle(&self, handle: &str) -> Result<ProfileResponseDto> {
        let normalized = handle.trim().to_lowercase();
        self.profiles
            .find_by_handle(&normalized)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Profile '@{}' not found", normalized)))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ProfileResponseDto> {
        self.profiles
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
    }

    pub async fn search(
        &self,
        query: &ProfileSearchQuery,
    ) -> Result<(Vec<ProfileResponseDto>, i64)> {
        let filter = ProfileFilter {
            query: query.q.clone(),
            role: query.role.clone(),
            location: query.location.clone(),
        };
        let pagination = query.pagination();

        let (profiles, total) = self
            .profiles
            .search(&filter, pagination.limit(), pagination.offset())
            .await?;

        Ok((profiles.into_iter().map(Into::into).collect(), total))
    }

    /// True when no other profile holds `handle`
    pub async fn check_handle_availability(&self, session: &Session, handle: &str) -> Result<bool> {
        let user = session.require_user()?;
        let normalized = handle.trim().to_lowercase();
        let taken = self
            .profiles
            .is_handle_taken(&normalized, user.user_id)
            .await?;
        Ok(!taken)
    }

    pub async fn update_profile(
        &self,
        session: &Session,
        dto: UpdateProfileDto,
    ) -> Result<ProfileResponseDto> {
        let user = session.require_user()?;
        let update = sanitize_profile_update(dto)?;

        if self
            .profiles
            .is_handle_taken(&update.handle, user.user_id)
            .await?
        {
            return Err(AppError::Conflict("Handle is already taken".to_string()));
        }

        let profile = self.profiles.upsert(user.user_id, &update).await?;
        tracing::info!(
            "Profile updated: id={}, handle={}",
            profile.id,
            update.handle
        );

        Ok(profile.into())
    }

    /// Replaces the top-films module; only the first 8 entries are kept
    pub async fn save_top_films(
        &self,
        session: &Session,
        films: Vec<TopFilmDto>,
    ) -> Result<Vec<TopFilmDto>> {
        let user = session.require_user()?;
        let films = sanitize_top_films(films)?;

        let profile = self
            .profiles
            .update_top_films(user.user_id, &films)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

        Ok(profile.top_films.0.into_iter().map(Into::into).collect())
    }
}

/// Applies the required-field and handle rules in order, then trims values
fn sanitize_profile_update(dto: UpdateProfileDto) -> Result<ProfileUpdate> {
    if dto.full_name.trim().is_empty() {
        return Err(AppError::Validation("Full name is required".to_string()));
    }
    if dto.handle.trim().is_empty() {
        return Err(AppError::Validation("Handle is required".to_string()));
    }
    if dto.role.trim().is_empty() {
        return Err(AppError::Validation("Role is required".to_string()));
    }
    if !HANDLE_REGEX.is_match(&dto.handle) {
        return Err(AppError::Validation(
            "Handle must contain only lowercase letters, numbers, and underscores".to_string(),
        ));
    }
    let handle_len = char_len(&dto.handle);
    if !(MIN_HANDLE_LENGTH..=MAX_HANDLE_LENGTH).contains(&handle_len) {
        return Err(AppError::Validation(format!(
            "Handle must be between {} and {} characters",
            MIN_HANDLE_LENGTH, MAX_HANDLE_LENGTH
        )));
    }

    let skills = dto
        .skills
        .unwrap_or_default()
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    Ok(ProfileUpdate {
        full_name: dto.full_name.trim().to_string(),
        handle: dto.handle.trim().to_lowercase(),
        role: dto.role.trim().to_string(),
        bio: non_blank(dto.bio),
        location: non_blank(dto.location),
        skills,
    })
}

fn sanitize_top_films(films: Vec<TopFilmDto>) -> Result<Vec<TopFilm>> {
    films
        .into_iter()
        .take(MAX_TOP_FILMS)
        .map(|film| {
            if film.title.trim().is_empty() {
                return Err(AppError::Validation("Film title is required".to_string()));
            }
            if char_len(&film.title) > MAX_FILM_TITLE_LENGTH {
                return Err(AppError::Validation("Film title too long".to_string()));
            }
            if let Some(year) = film.year {
                if !(MIN_FILM_YEAR..=MAX_FILM_YEAR).contains(&year) {
                    return Err(AppError::Validation("Invalid film year".to_string()));
                }
            }
            Ok(TopFilm {
                title: film.title,
                year: film.year,
            })
        })
        .collect()
}
