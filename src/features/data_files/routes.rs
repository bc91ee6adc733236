use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::data_files::{handlers, services::DataFileService};

pub fn read_routes(service: Arc<DataFileService>) -> Router {
    Router::new()
        .route("/api/data/{filename}", get(handlers::get_data_file))
        .with_state(service)
}

/// Needs an editor session
pub fn write_routes(service: Arc<DataFileService>) -> Router {
    Router::new()
        .route("/api/data/{filename}", post(handlers::save_data_file))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::models::Role;
    use crate::shared::test_helpers::with_role;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server(role: Role) -> (TestServer, Arc<DataFileService>) {
        let service = Arc::new(DataFileService::new(
            std::env::temp_dir().join(format!("sabores-data-{}", uuid::Uuid::new_v4())),
        ));
        let app = with_role(write_routes(Arc::clone(&service)), role)
            .merge(read_routes(Arc::clone(&service)));
        let server = TestServer::new(app).unwrap();
        (server, service)
    }

    #[tokio::test]
    async fn test_save_and_fetch() {
        let (server, service) = server(Role::Editor);
        server
            .get("/api/data/gallery.json")
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let document = json!({"images": [{"id": 1, "title": "Mesa"}], "categories": []});
        server
            .post("/api/data/gallery.json")
            .json(&document)
            .await
            .assert_status_ok();

        let fetched: Value = server.get("/api/data/gallery.json").await.json();
        assert_eq!(fetched, document);

        std::fs::remove_dir_all(service.dir()).unwrap();
    }

    #[tokio::test]
    async fn test_invalid_name_is_bad_request() {
        let (server, _) = server(Role::Editor);
        server
            .get("/api/data/passwords.txt")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_viewer_cannot_write() {
        let (server, _) = server(Role::Viewer);
        server
            .post("/api/data/services.json")
            .json(&json!({"services": []}))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
