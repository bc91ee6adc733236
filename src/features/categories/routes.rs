use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Category routes for one catalog, mounted under `/api/database/{kind}/categories`
pub fn routes(service: Arc<CategoryService>) -> Router {
    let base = format!("/api/database/{}/categories", service.kind().path());

    Router::new()
        .route(
            &base,
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            &format!("{}/{{id}}", base),
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::models::{Category, CategoryKind};
    use crate::features::services::models::Service;
    use crate::features::users::models::Role;
    use crate::shared::constants::SERVICES_COLLECTION;
    use crate::shared::entity::EntityStore;
    use crate::shared::test_helpers::{memory_backend, with_role};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    async fn setup(role: Role) -> (TestServer, Arc<EntityStore<Service>>) {
        let backend = memory_backend();
        let services = Arc::new(EntityStore::new(Arc::clone(&backend), SERVICES_COLLECTION));
        let categories = Arc::new(CategoryService::new(
            CategoryKind::Services,
            backend,
            services.clone(),
        ));
        categories
            .collection()
            .replace(&[
                Category::seed("catering", "Catering", "#D46528"),
                Category::seed("eventos", "Eventos", "#185A48"),
            ])
            .await
            .unwrap();

        let server = TestServer::new(with_role(routes(categories), role)).unwrap();
        (server, services)
    }

    #[tokio::test]
    async fn test_routes_are_scoped_to_kind() {
        let (server, _) = setup(Role::Viewer).await;
        let listed: Value = server.get("/api/database/services/categories").await.json();
        assert_eq!(listed["meta"]["total"], 2);

        server
            .get("/api/database/tips/categories")
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let one: Value = server
            .get("/api/database/services/categories/eventos")
            .await
            .json();
        assert_eq!(one["data"]["name"], "Eventos");
    }

    #[tokio::test]
    async fn test_create_validates_slug_and_color() {
        let (server, _) = setup(Role::Editor).await;
        server
            .post("/api/database/services/categories")
            .json(&json!({"id": "Menus Especiales", "name": "Menús"}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .post("/api/database/services/categories")
            .json(&json!({"name": "Menús", "color": "naranja"}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let response = server
            .post("/api/database/services/categories")
            .json(&json!({"id": "menus", "name": "Menús", "color": "#FFAA00"}))
            .await;
        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Value>()["data"]["color"], "#FFAA00");
    }

    #[tokio::test]
    async fn test_delete_referenced_category_conflicts() {
        let (server, services) = setup(Role::Admin).await;
        services
            .create(|_, id, now| {
                Ok(Service {
                    id,
                    title: "Bodas".to_string(),
                    description: "Banquetes".to_string(),
                    icon: "bi-heart".to_string(),
                    category: "eventos".to_string(),
                    badge: None,
                    order: 1,
                    active: true,
                    featured: false,
                    created_at: Some(now),
                    updated_at: Some(now),
                })
            })
            .await
            .unwrap();

        server
            .delete("/api/database/services/categories/eventos")
            .await
            .assert_status(StatusCode::CONFLICT);
        server
            .delete("/api/database/services/categories/catering")
            .await
            .assert_status_ok();
        server
            .delete("/api/database/services/categories/catering")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_viewer_cannot_create() {
        let (server, _) = setup(Role::Viewer).await;
        server
            .post("/api/database/services/categories")
            .json(&json!({"name": "Brunch"}))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
