use crate::features::events::handlers::events_handler;
use crate::modules::invalidation::ViewInvalidator;
use axum::{routing::get, Router};
use std::sync::Arc;

pub fn routes(invalidator: Arc<ViewInvalidator>) -> Router {
    Router::new()
        .route("/api/events", get(events_handler::stream_events))
        .with_state(invalidator)
}
