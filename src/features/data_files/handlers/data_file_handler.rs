use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireEditor;
use crate::features::data_files::services::DataFileService;
use crate::shared::types::ApiResponse;

/// Raw contents of a data file
#[utoipa::path(
    get,
    path = "/api/data/{filename}",
    params(
        ("filename" = String, Path, description = "File name such as services.json")
    ),
    responses(
        (status = 200, description = "File contents as stored"),
        (status = 400, description = "Invalid file name or unreadable file"),
        (status = 404, description = "File not found")
    ),
    tag = "data"
)]
pub async fn get_data_file(
    State(service): State<Arc<DataFileService>>,
    Path(filename): Path<String>,
) -> Result<Json<Value>> {
    Ok(Json(service.read(&filename).await?))
}

/// Overwrite a data file with the request body
#[utoipa::path(
    post,
    path = "/api/data/{filename}",
    params(
        ("filename" = String, Path, description = "File name such as services.json")
    ),
    responses(
        (status = 200, description = "File saved", body = ApiResponse<String>),
        (status = 400, description = "Invalid file name or body"),
        (status = 403, description = "Forbidden")
    ),
    tag = "data",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn save_data_file(
    RequireEditor(user): RequireEditor,
    State(service): State<Arc<DataFileService>>,
    Path(filename): Path<String>,
    AppJson(document): AppJson<Value>,
) -> Result<Json<ApiResponse<String>>> {
    service.write(&filename, &document).await?;
    tracing::info!("Data file {} replaced by {}", filename, user.username);

    Ok(Json(ApiResponse::success(
        Some(filename),
        Some("File saved".to_string()),
        None,
    )))
}
