use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Public auth routes (no session required)
pub fn public_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/database/auth", post(handlers::login))
        .with_state(service)
}

/// Protected auth routes (require a session token)
pub fn protected_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/database/logout", post(handlers::logout))
        .route("/api/database/me", get(handlers::get_me))
        .with_state(service)
}
