use crate::features::profiles::handlers::profile_handler;
use crate::features::profiles::services::ProfileService;
use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

pub fn routes(service: Arc<ProfileService>) -> Router {
    Router::new()
        .route("/api/profiles", get(profile_handler::search_profiles))
        .route(
            "/api/profiles/me",
            get(profile_handler::get_me).put(profile_handler::update_profile),
        )
        .route(
            "/api/profiles/me/top-films",
            put(profile_handler::save_top_films),
        )
        .route(
            "/api/profiles/handle-availability",
            get(profile_handler::check_handle_availability),
        )
        .route(
            "/api/profiles/id/{user_id}",
            get(profile_handler::get_profile_by_id),
        )
        .route(
            "/api/profiles/{handle}",
            get(profile_handler::get_profile_by_handle),
        )
        .with_state(service)
}
