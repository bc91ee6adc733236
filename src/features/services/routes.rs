use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::features::services::{handlers, services::ServiceCatalogService};

/// Back-office routes for services (session required)
pub fn admin_routes(service: Arc<ServiceCatalogService>) -> Router {
    Router::new()
        .route(
            "/api/database/services",
            get(handlers::list_services).post(handlers::create_service),
        )
        .route(
            "/api/database/services/search",
            get(handlers::search_services),
        )
        .route(
            "/api/database/services/reorder",
            put(handlers::reorder_services),
        )
        .route(
            "/api/database/services/{id}",
            get(handlers::get_service)
                .put(handlers::update_service)
                .delete(handlers::delete_service),
        )
        .route(
            "/api/database/services/{id}/restore",
            post(handlers::restore_service),
        )
        .with_state(service)
}

/// Public read-only routes used by the site
pub fn public_routes(service: Arc<ServiceCatalogService>) -> Router {
    Router::new()
        .route("/api/services", get(handlers::list_active_services))
        .with_state(service)
}
