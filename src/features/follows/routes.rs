use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::follows::handlers::follow_handler;
use crate::features::follows::services::FollowService;

pub fn routes(service: Arc<FollowService>) -> Router {
    Router::new()
        .route(
            "/api/follows/{user_id}",
            get(follow_handler::get_follow_status)
                .post(follow_handler::follow_user)
                .delete(follow_handler::unfollow_user),
        )
        .route(
            "/api/follows/{user_id}/counts",
            get(follow_handler::get_follow_counts),
        )
        .with_state(service)
}
