use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    response::{
        sse::{Event, KeepAlive},
        IntoResponse, Response, Sse,
    },
};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;
use uuid::Uuid;

use crate::features::auth::model::AuthenticatedUser;
use crate::modules::invalidation::{ViewInvalidation, ViewInvalidator};

/// Stream view invalidations addressed to the current user
#[utoipa::path(
    get,
    path = "/api/events",
    responses(
        (status = 200, description = "SSE stream; each `invalidate` event carries a ViewInvalidation", body = String, content_type = "text/event-stream"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "events",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn stream_events(
    user: AuthenticatedUser,
    State(invalidator): State<Arc<ViewInvalidator>>,
) -> Response {
    let user_id = user.user_id;
    tracing::debug!(%user_id, "Event stream opened");

    let stream = BroadcastStream::new(invalidator.subscribe()).filter_map(move |received| {
        match received {
            Ok(invalidation) => to_event(user_id, &invalidation).map(Ok::<_, Infallible>),
            Err(lagged) => {
                tracing::warn!(%user_id, "Event stream lagged: {}", lagged);
                None
            }
        }
    });

    Sse::new(stream)
        .keep_alive(
            KeepAlive::new()
                .interval(Duration::from_secs(15))
                .text("ping"),
        )
        .into_response()
}

fn to_event(user_id: Uuid, invalidation: &ViewInvalidation) -> Option<Event> {
    if !invalidation.concerns(user_id) {
        return None;
    }

    match Event::default().event("invalidate").json_data(invalidation) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::error!("Failed to encode invalidation event: {:?}", e);
            None
        }
    }
}
