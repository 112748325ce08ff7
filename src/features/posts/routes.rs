use crate::features::posts::handlers::post_handler;
use crate::features::posts::services::PostService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn routes(service: Arc<PostService>) -> Router {
    Router::new()
        .route("/api/posts", post(post_handler::create_post))
        .route(
            "/api/posts/user/{user_id}",
            get(post_handler::list_user_posts),
        )
        .route("/api/feed", get(post_handler::get_feed))
        .with_state(service)
}
