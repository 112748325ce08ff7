use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::events::handlers as events_handlers;
use crate::features::follows::{dtos as follows_dtos, handlers as follows_handlers};
use crate::features::marketplace::{
    dtos as marketplace_dtos, handlers as marketplace_handlers, models as marketplace_models,
};
use crate::features::messages::{dtos as messages_dtos, handlers as messages_handlers};
use crate::features::posts::{dtos as posts_dtos, handlers as posts_handlers};
use crate::features::profiles::{dtos as profiles_dtos, handlers as profiles_handlers};
use crate::features::projects::{dtos as projects_dtos, handlers as projects_handlers};
use crate::modules::invalidation::ViewInvalidation;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Messages
        messages_handlers::message_handler::list_threads,
        messages_handlers::message_handler::get_thread,
        messages_handlers::message_handler::send_message,
        // Events
        events_handlers::events_handler::stream_events,
        // Profiles
        profiles_handlers::profile_handler::search_profiles,
        profiles_handlers::profile_handler::get_me,
        profiles_handlers::profile_handler::update_profile,
        profiles_handlers::profile_handler::save_top_films,
        profiles_handlers::profile_handler::check_handle_availability,
        profiles_handlers::profile_handler::get_profile_by_handle,
        profiles_handlers::profile_handler::get_profile_by_id,
        // Follows
        follows_handlers::follow_handler::follow_user,
        follows_handlers::follow_handler::unfollow_user,
        follows_handlers::follow_handler::get_follow_status,
        follows_handlers::follow_handler::get_follow_counts,
        // Posts
        posts_handlers::post_handler::create_post,
        posts_handlers::post_handler::list_user_posts,
        posts_handlers::post_handler::get_feed,
        // Projects
        projects_handlers::project_handler::list_projects,
        projects_handlers::project_handler::get_project,
        projects_handlers::project_handler::create_project,
        // Marketplace
        marketplace_handlers::listing_handler::list_listings,
        marketplace_handlers::listing_handler::get_listing,
        marketplace_handlers::listing_handler::create_listing,
    ),
    components(
        schemas(
            // Shared
            Meta,
            auth::model::AuthenticatedUser,
            ViewInvalidation,
            // Messages
            messages_dtos::ThreadDto,
            messages_dtos::ThreadDetailDto,
            messages_dtos::MessageDto,
            messages_dtos::SendMessageDto,
            ApiResponse<Vec<messages_dtos::ThreadDto>>,
            ApiResponse<messages_dtos::ThreadDetailDto>,
            ApiResponse<messages_dtos::MessageDto>,
            // Profiles
            profiles_dtos::ProfileResponseDto,
            profiles_dtos::ProfileSummaryDto,
            profiles_dtos::MeResponseDto,
            profiles_dtos::TopFilmDto,
            profiles_dtos::SaveTopFilmsDto,
            profiles_dtos::UpdateProfileDto,
            profiles_dtos::HandleAvailabilityDto,
            ApiResponse<profiles_dtos::ProfileResponseDto>,
            ApiResponse<Vec<profiles_dtos::ProfileResponseDto>>,
            ApiResponse<profiles_dtos::MeResponseDto>,
            ApiResponse<Vec<profiles_dtos::TopFilmDto>>,
            ApiResponse<profiles_dtos::HandleAvailabilityDto>,
            // Follows
            follows_dtos::FollowResultDto,
            follows_dtos::FollowStatusDto,
            follows_dtos::FollowCountsDto,
            ApiResponse<follows_dtos::FollowResultDto>,
            ApiResponse<follows_dtos::FollowStatusDto>,
            ApiResponse<follows_dtos::FollowCountsDto>,
            // Posts
            posts_dtos::PostResponseDto,
            posts_dtos::CreatePostDto,
            posts_dtos::FeedItemDto,
            ApiResponse<posts_dtos::PostResponseDto>,
            ApiResponse<Vec<posts_dtos::PostResponseDto>>,
            ApiResponse<Vec<posts_dtos::FeedItemDto>>,
            // Projects
            projects_dtos::ProjectResponseDto,
            projects_dtos::CreateProjectDto,
            ApiResponse<projects_dtos::ProjectResponseDto>,
            ApiResponse<Vec<projects_dtos::ProjectResponseDto>>,
            // Marketplace
            marketplace_models::ListingCategory,
            marketplace_dtos::ListingResponseDto,
            marketplace_dtos::CreateListingDto,
            ApiResponse<marketplace_dtos::ListingResponseDto>,
            ApiResponse<Vec<marketplace_dtos::ListingResponseDto>>,
        )
    ),
    tags(
        (name = "messages", description = "Direct messages and conversation threads"),
        (name = "events", description = "Server-sent view invalidations"),
        (name = "profiles", description = "Crew profiles and search"),
        (name = "follows", description = "Follow relationships"),
        (name = "posts", description = "Profile posts and the followers feed"),
        (name = "projects", description = "Project postings looking for crew"),
        (name = "marketplace", description = "Gear, location and service listings"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Reelcrew API",
        version = "0.1.0",
        description = "API documentation for Reelcrew",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
