use crate::features::users::handlers;
use crate::features::users::services::UserService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// User management routes (admin only)
pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route(
            "/api/database/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/api/database/users/{id}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route(
            "/api/database/users/{id}/restore",
            post(handlers::restore_user),
        )
        .with_state(service)
}
