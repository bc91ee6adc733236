use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::features::gallery::{handlers, services::GalleryService};

pub fn admin_routes(service: Arc<GalleryService>) -> Router {
    Router::new()
        .route(
            "/api/database/gallery",
            get(handlers::list_images).post(handlers::create_image),
        )
        .route("/api/database/gallery/search", get(handlers::search_images))
        .route(
            "/api/database/gallery/reorder",
            put(handlers::reorder_images),
        )
        .route(
            "/api/database/gallery/{id}",
            get(handlers::get_image)
                .put(handlers::update_image)
                .delete(handlers::delete_image),
        )
        .route(
            "/api/database/gallery/{id}/restore",
            post(handlers::restore_image),
        )
        .with_state(service)
}

pub fn public_routes(service: Arc<GalleryService>) -> Router {
    Router::new()
        .route("/api/gallery", get(handlers::list_active_images))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::models::{Category, CategoryKind};
    use crate::features::categories::CategoryService;
    use crate::features::users::models::Role;
    use crate::shared::constants::GALLERY_COLLECTION;
    use crate::shared::entity::EntityStore;
    use crate::shared::test_helpers::{memory_backend, with_role};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    async fn server(role: Role) -> TestServer {
        let backend = memory_backend();
        let store = Arc::new(EntityStore::new(Arc::clone(&backend), GALLERY_COLLECTION));
        let categories = Arc::new(CategoryService::new(
            CategoryKind::Gallery,
            backend,
            store.clone(),
        ));
        categories
            .collection()
            .replace(&[
                Category::seed("platos", "Platos Principales", "#D46528"),
                Category::seed("eventos", "Eventos", "#185A48"),
            ])
            .await
            .unwrap();
        let service = Arc::new(GalleryService::new(store, categories));

        let app = with_role(admin_routes(Arc::clone(&service)), role).merge(public_routes(service));
        TestServer::new(app).unwrap()
    }

    async fn add(server: &TestServer, title: &str, category: &str, featured: bool) {
        server
            .post("/api/database/gallery")
            .json(&json!({
                "title": title,
                "url": format!("https://example.com/{}.jpg", category),
                "category": category,
                "featured": featured
            }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_public_gallery_filters_by_category_and_featured() {
        let server = server(Role::Editor).await;
        add(&server, "Plato estrella", "platos", true).await;
        add(&server, "Evento corporativo", "eventos", true).await;
        add(&server, "Ceviche", "platos", false).await;

        let platos: Value = server
            .get("/api/gallery")
            .add_query_param("category", "platos")
            .await
            .json();
        assert_eq!(platos["data"].as_array().unwrap().len(), 2);

        let featured: Value = server
            .get("/api/gallery")
            .add_query_param("featured", "true")
            .await
            .json();
        assert_eq!(featured["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_category_is_bad_request() {
        let server = server(Role::Admin).await;
        server
            .post("/api/database/gallery")
            .json(&json!({
                "title": "Bebida",
                "url": "https://example.com/bebida.jpg",
                "category": "bebidas"
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_image_url_must_be_absolute() {
        let server = server(Role::Editor).await;
        server
            .post("/api/database/gallery")
            .json(&json!({
                "title": "Sin enlace",
                "url": "no es una url",
                "category": "platos"
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        add(&server, "Con enlace", "platos", false).await;
        server
            .put("/api/database/gallery/1")
            .json(&json!({"url": "imagenes/plato.jpg"}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_paginated_admin_listing() {
        let server = server(Role::Editor).await;
        for n in 1..=7 {
            add(&server, &format!("Foto {}", n), "platos", false).await;
        }

        let second: Value = server
            .get("/api/database/gallery")
            .add_query_param("page", "2")
            .add_query_param("pageSize", "5")
            .await
            .json();
        assert_eq!(second["meta"]["total"], 7);
        assert_eq!(second["data"].as_array().unwrap().len(), 2);
        assert_eq!(second["data"][0]["title"], "Foto 6");

        let beyond: Value = server
            .get("/api/database/gallery")
            .add_query_param("page", i64::MAX.to_string())
            .await
            .json();
        assert_eq!(beyond["meta"]["total"], 7);
        assert_eq!(beyond["data"].as_array().unwrap().len(), 0);
    }
}
