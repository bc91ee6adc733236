use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::features::tips::{handlers, services::TipService};

/// Back-office routes for cooking tips (session required)
pub fn admin_routes(service: Arc<TipService>) -> Router {
    Router::new()
        .route(
            "/api/database/tips",
            get(handlers::list_tips).post(handlers::create_tip),
        )
        .route("/api/database/tips/search", get(handlers::search_tips))
        .route("/api/database/tips/reorder", put(handlers::reorder_tips))
        .route(
            "/api/database/tips/{id}",
            get(handlers::get_tip)
                .put(handlers::update_tip)
                .delete(handlers::delete_tip),
        )
        .route(
            "/api/database/tips/{id}/restore",
            post(handlers::restore_tip),
        )
        .with_state(service)
}

pub fn public_routes(service: Arc<TipService>) -> Router {
    Router::new()
        .route("/api/tips", get(handlers::list_active_tips))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::models::{Category, CategoryKind};
    use crate::features::categories::CategoryService;
    use crate::features::users::models::Role;
    use crate::shared::constants::TIPS_COLLECTION;
    use crate::shared::entity::EntityStore;
    use crate::shared::test_helpers::{memory_backend, with_role};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    async fn server(role: Role) -> TestServer {
        let backend = memory_backend();
        let store = Arc::new(EntityStore::new(Arc::clone(&backend), TIPS_COLLECTION));
        let categories = Arc::new(CategoryService::new(
            CategoryKind::Tips,
            backend,
            store.clone(),
        ));
        categories
            .collection()
            .replace(&[Category::seed("tecnicas", "Técnicas", "#185A48")])
            .await
            .unwrap();
        let service = Arc::new(TipService::new(store, categories));

        let app = with_role(admin_routes(Arc::clone(&service)), role).merge(public_routes(service));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_create_accepts_spanish_difficulty() {
        let server = server(Role::Editor).await;
        let response = server
            .post("/api/database/tips")
            .json(&json!({
                "title": "Pasta al dente",
                "content": "Prueba la pasta un minuto antes",
                "category": "tecnicas",
                "difficulty": "fácil",
                "tags": ["Pasta"]
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["difficulty"], "easy");
        assert_eq!(body["data"]["tags"], json!(["pasta"]));
    }

    #[tokio::test]
    async fn test_search_finds_tags() {
        let server = server(Role::Editor).await;
        server
            .post("/api/database/tips")
            .json(&json!({
                "title": "Salsa espesa",
                "content": "Reduce a fuego lento",
                "category": "tecnicas",
                "tags": ["salsas"]
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let found: Value = server
            .get("/api/database/tips/search")
            .add_query_param("q", "salsas")
            .await
            .json();
        assert_eq!(found["meta"]["total"], 1);

        let public: Value = server.get("/api/tips").await.json();
        assert_eq!(public["data"][0]["title"], "Salsa espesa");
    }

    #[tokio::test]
    async fn test_invalid_payload_is_rejected() {
        let server = server(Role::Admin).await;
        server
            .post("/api/database/tips")
            .json(&json!({
                "title": "",
                "content": "x",
                "category": "tecnicas"
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
