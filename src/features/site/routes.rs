use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::site::{handlers, services::SiteService};

/// Public pages, fragments and the contact form
pub fn routes(site: Arc<SiteService>) -> Router {
    Router::new()
        .route("/", get(handlers::index_page))
        .route("/fragments/{kind}", get(handlers::catalog_fragment))
        .route("/api/contact", post(handlers::submit_contact))
        .with_state(site)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::models::Category;
    use crate::features::database::DataStores;
    use crate::features::gallery::GalleryService;
    use crate::features::messages::models::MessagePriority;
    use crate::features::messages::MessageService;
    use crate::features::services::ServiceCatalogService;
    use crate::features::tips::TipService;
    use crate::shared::templates::TemplateEngine;
    use crate::shared::test_helpers::memory_backend;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;
    use serde_json::{json, Value};

    async fn setup() -> (TestServer, DataStores) {
        let stores = DataStores::new(memory_backend());
        stores
            .service_categories
            .collection()
            .replace(&[Category::seed("catering", "Catering", "#D46528")])
            .await
            .unwrap();

        let site = Arc::new(SiteService::new(
            Arc::new(TemplateEngine::builtin()),
            Arc::new(ServiceCatalogService::new(
                stores.services.clone(),
                stores.service_categories.clone(),
            )),
            Arc::new(TipService::new(
                stores.tips.clone(),
                stores.tip_categories.clone(),
            )),
            Arc::new(GalleryService::new(
                stores.gallery.clone(),
                stores.gallery_categories.clone(),
            )),
            Arc::new(MessageService::new(stores.messages.clone())),
        ));

        (TestServer::new(routes(site)).unwrap(), stores)
    }

    #[tokio::test]
    async fn test_index_is_html() {
        let (server, _) = setup().await;
        let response = server.get("/").await;
        response.assert_status_ok();
        assert!(response.text().contains("<!DOCTYPE html>"));
        assert!(response.text().contains("services-grid"));
    }

    #[tokio::test]
    async fn test_unknown_fragment_is_not_found() {
        let (server, _) = setup().await;
        server.get("/fragments/services").await.assert_status_ok();
        server
            .get("/fragments/messages")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_contact_form_stores_message() {
        let (server, stores) = setup().await;
        let name: String = Name().fake();
        let email: String = SafeEmail().fake();

        let response = server
            .post("/api/contact")
            .json(&json!({
                "name": name,
                "email": email,
                "message": "Necesito catering urgente para una boda"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        let id = body["data"]["id"].as_i64().unwrap();

        let stored = stores.messages.get_by_id(id).await.unwrap();
        assert_eq!(stored.name, name);
        assert_eq!(stored.subject, "Contacto desde el sitio web");
        assert_eq!(stored.priority, MessagePriority::Urgent);
    }

    #[tokio::test]
    async fn test_contact_form_rejects_bad_email() {
        let (server, stores) = setup().await;
        server
            .post("/api/contact")
            .json(&json!({
                "name": "Ana",
                "email": "no-es-correo",
                "message": "Hola"
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(stores.messages.count().await.unwrap().total, 0);
    }
}
