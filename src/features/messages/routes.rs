use crate::features::messages::handlers::message_handler;
use crate::features::messages::services::MessageService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn routes(service: Arc<MessageService>) -> Router {
    Router::new()
        .route("/api/messages", post(message_handler::send_message))
        .route("/api/messages/threads", get(message_handler::list_threads))
        .route(
            "/api/messages/threads/{user_id}",
            get(message_handler::get_thread),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::invalidation::ViewInvalidator;
    use crate::shared::test_helpers::{seed_profile, with_user, InMemoryStore};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn service(store: &Arc<InMemoryStore>) -> Arc<MessageService> {
        Arc::new(MessageService::new(
            store.clone(),
            store.clone(),
            Arc::new(ViewInvalidator::default()),
        ))
    }

    #[tokio::test]
    async fn test_send_then_list_threads() {
        let store = Arc::new(InMemoryStore::default());
        let a = seed_profile(&store, "Ana Ruiz", "ana_r");
        let b = seed_profile(&store, "Ben Ortiz", "ben_o");

        let as_a = TestServer::new(with_user(routes(service(&store)), a)).unwrap();
        as_a.post("/api/messages")
            .json(&json!({ "recipient_id": b, "body": "Are you free Friday?" }))
            .await
            .assert_status(StatusCode::CREATED);

        let as_b = TestServer::new(with_user(routes(service(&store)), b)).unwrap();
        let body: Value = as_b.get("/api/messages/threads").await.json();
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["data"][0]["counterpart_handle"], "ana_r");
        assert_eq!(body["data"][0]["unread_count"], 1);

        let body: Value = as_b
            .get(&format!("/api/messages/threads/{}", a))
            .await
            .json();
        assert_eq!(body["data"]["counterpart"]["full_name"], "Ana Ruiz");
        assert_eq!(body["data"]["messages"][0]["body"], "Are you free Friday?");
    }

    #[tokio::test]
    async fn test_send_blank_message_rejected() {
        let store = Arc::new(InMemoryStore::default());
        let a = seed_profile(&store, "Ana Ruiz", "ana_r");
        let b = seed_profile(&store, "Ben Ortiz", "ben_o");
        let server = TestServer::new(with_user(routes(service(&store)), a)).unwrap();

        let response = server
            .post("/api/messages")
            .json(&json!({ "recipient_id": b, "body": "   " }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Message cannot be empty.");
        assert_eq!(store.message_count(), 0);
    }

    #[tokio::test]
    async fn test_anonymous_access() {
        let store = Arc::new(InMemoryStore::default());
        let b = seed_profile(&store, "Ben Ortiz", "ben_o");
        let server = TestServer::new(routes(service(&store))).unwrap();

        let body: Value = server.get("/api/messages/threads").await.json();
        assert_eq!(body["data"], json!([]));

        server
            .get(&format!("/api/messages/threads/{}", b))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .post("/api/messages")
            .json(&json!({ "recipient_id": b, "body": "hi" }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
