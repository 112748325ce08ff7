use crate::features::projects::handlers::project_handler;
use crate::features::projects::services::ProjectService;
use axum::{routing::get, Router};
use std::sync::Arc;

pub fn routes(service: Arc<ProjectService>) -> Router {
    Router::new()
        .route(
            "/api/projects",
            get(project_handler::list_projects).post(project_handler::create_project),
        )
        .route("/api/projects/{id}", get(project_handler::get_project))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::invalidation::ViewInvalidator;
    use crate::shared::test_helpers::{seed_profile, with_user, InMemoryStore};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::Utc;
    use serde_json::{json, Value};
    use uuid::Uuid;

    fn service(store: &Arc<InMemoryStore>) -> Arc<ProjectService> {
        Arc::new(ProjectService::new(
            store.clone(),
            Arc::new(ViewInvalidator::default()),
        ))
    }

    #[tokio::test]
    async fn test_post_and_fetch_project() {
        let store = Arc::new(InMemoryStore::default());
        let me = seed_profile(&store, "Ana Ruiz", "ana_r");
        let server = TestServer::new(with_user(routes(service(&store)), me)).unwrap();

        let response = server
            .post("/api/projects")
            .json(&json!({
                "title": " Desert Western ",
                "description": "Two-week shoot outside Tucson",
                "role_needed": "Gaffer",
                "location": "Tucson, AZ",
                "min_day_rate": 450,
                "start_date": "2025-09-01"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["title"], "Desert Western");
        assert_eq!(body["data"]["requirements"], json!([]));

        let id = body["data"]["id"].as_str().unwrap().to_string();
        let body: Value = server.get(&format!("/api/projects/{}", id)).await.json();
        assert_eq!(body["data"]["start_date"], "2025-09-01");

        let body: Value = server.get("/api/projects?q=western").await.json();
        assert_eq!(body["meta"]["total"], 1);
    }

    #[tokio::test]
    async fn test_post_project_reports_first_missing_field() {
        let store = Arc::new(InMemoryStore::default());
        let me = seed_profile(&store, "Ana Ruiz", "ana_r");
        let server = TestServer::new(with_user(routes(service(&store)), me)).unwrap();

        let response = server
            .post("/api/projects")
            .json(&json!({ "title": "Desert Western" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Project description is required");
    }

    #[tokio::test]
    async fn test_post_project_requires_auth() {
        let store = Arc::new(InMemoryStore::default());
        let server = TestServer::new(routes(service(&store))).unwrap();

        let response = server
            .post("/api/projects")
            .json(&json!({
                "title": "a", "description": "b", "role_needed": "c", "location": "d"
            }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_project_is_not_found() {
        let store = Arc::new(InMemoryStore::default());
        let me = seed_profile(&store, "Ana Ruiz", "ana_r");
        store.push_project(me, "Night Shoot", "Gaffer", Utc::now());
        let server = TestServer::new(routes(service(&store))).unwrap();

        let response = server.get(&format!("/api/projects/{}", Uuid::new_v4())).await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}
