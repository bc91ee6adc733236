use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::database::{handlers, services::DatabaseService};

pub fn routes(service: Arc<DatabaseService>) -> Router {
    Router::new()
        .route("/api/database/stats", get(handlers::get_stats))
        .route("/api/database/export", get(handlers::export_database))
        .route("/api/database/import", post(handlers::import_database))
        .route("/api/database/reset", post(handlers::reset_database))
        .with_state(service)
}
