use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::features::messages::{handlers, services::MessageService};

/// Back-office inbox routes (session required)
pub fn routes(service: Arc<MessageService>) -> Router {
    Router::new()
        .route("/api/database/messages", get(handlers::list_messages))
        .route("/api/database/messages/stats", get(handlers::message_stats))
        .route(
            "/api/database/messages/cleanup",
            post(handlers::cleanup_messages),
        )
        .route(
            "/api/database/messages/{id}",
            get(handlers::get_message)
                .put(handlers::update_message)
                .delete(handlers::delete_message),
        )
        .route(
            "/api/database/messages/{id}/restore",
            post(handlers::restore_message),
        )
        .route(
            "/api/database/messages/{id}/read",
            post(handlers::mark_message_read),
        )
        .route(
            "/api/database/messages/{id}/replied",
            post(handlers::mark_message_replied),
        )
        .route(
            "/api/database/messages/{id}/priority",
            put(handlers::change_message_priority),
        )
        .route(
            "/api/database/messages/{id}/tags",
            post(handlers::add_message_tags).delete(handlers::remove_message_tags),
        )
        .with_state(service)
}
