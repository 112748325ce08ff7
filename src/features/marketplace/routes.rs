use crate::features::marketplace::handlers::listing_handler;
use crate::features::marketplace::services::ListingService;
use axum::{routing::get, Router};
use std::sync::Arc;

pub fn routes(service: Arc<ListingService>) -> Router {
    Router::new()
        .route(
            "/api/marketplace",
            get(listing_handler::list_listings).post(listing_handler::create_listing),
        )
        .route("/api/marketplace/{id}", get(listing_handler::get_listing))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::marketplace::models::ListingCategory;
    use crate::modules::invalidation::ViewInvalidator;
    use crate::shared::test_helpers::{seed_profile, with_user, InMemoryStore};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::Utc;
    use serde_json::{json, Value};

    fn service(store: &Arc<InMemoryStore>) -> Arc<ListingService> {
        Arc::new(ListingService::new(
            store.clone(),
            Arc::new(ViewInvalidator::default()),
        ))
    }

    #[tokio::test]
    async fn test_create_and_fetch_listing() {
        let store = Arc::new(InMemoryStore::default());
        let me = seed_profile(&store, "Ana Ruiz", "ana_r");
        let server = TestServer::new(with_user(routes(service(&store)), me)).unwrap();

        let response = server
            .post("/api/marketplace")
            .json(&json!({
                "category": "gear",
                "title": "ARRI SkyPanel S60",
                "description": "Two units with stands",
                "rate": "$120/day",
                "location": "Atlanta, GA"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["category"], "gear");
        assert_eq!(body["data"]["photos"], json!([]));

        let id = body["data"]["id"].as_str().unwrap().to_string();
        server
            .get(&format!("/api/marketplace/{}", id))
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_list_filters_by_category() {
        let store = Arc::new(InMemoryStore::default());
        let me = seed_profile(&store, "Ana Ruiz", "ana_r");
        store.push_listing(me, ListingCategory::Gear, "Dolly", Utc::now());
        store.push_listing(me, ListingCategory::Location, "Loft", Utc::now());
        let server = TestServer::new(routes(service(&store))).unwrap();

        let body: Value = server.get("/api/marketplace?category=all").await.json();
        assert_eq!(body["meta"]["total"], 2);

        let body: Value = server.get("/api/marketplace?category=location").await.json();
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["data"][0]["title"], "Loft");

        server
            .get("/api/marketplace?category=props")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_listing_without_category() {
        let store = Arc::new(InMemoryStore::default());
        let me = seed_profile(&store, "Ana Ruiz", "ana_r");
        let server = TestServer::new(with_user(routes(service(&store)), me)).unwrap();

        let response = server
            .post("/api/marketplace")
            .json(&json!({
                "title": "Colorist",
                "description": "Resolve grading",
                "rate": "$600/day",
                "location": "Remote"
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Category is required");
    }
}
