use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::{RequireAdmin, RequireViewer};
use crate::features::database::dtos::{ImportResultDto, ResetResultDto};
use crate::features::database::models::{DatabaseSnapshot, DatabaseStats};
use crate::features::database::services::DatabaseService;
use crate::shared::types::ApiResponse;

/// Record counts per collection
#[utoipa::path(
    get,
    path = "/api/database/stats",
    responses(
        (status = 200, description = "Database statistics", body = ApiResponse<DatabaseStats>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "database",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_stats(
    RequireViewer(_user): RequireViewer,
    State(service): State<Arc<DatabaseService>>,
) -> Result<Json<ApiResponse<DatabaseStats>>> {
    let stats = service.stats().await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// Download a JSON backup of every collection
#[utoipa::path(
    get,
    path = "/api/database/export",
    responses(
        (status = 200, description = "Backup file", body = DatabaseSnapshot),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "database",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn export_database(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<DatabaseService>>,
) -> Result<impl IntoResponse> {
    let snapshot = service.export().await?;
    let filename = format!(
        "sabores-ancestrales-backup-{}.json",
        snapshot
            .exported_at
            .unwrap_or_else(chrono::Utc::now)
            .format("%Y-%m-%d")
    );
    tracing::info!("Database exported by {}", admin.username);

    Ok((
        [(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )],
        Json(snapshot),
    ))
}

/// Restore collections from a backup; collections missing from the body are kept
#[utoipa::path(
    post,
    path = "/api/database/import",
    request_body = DatabaseSnapshot,
    responses(
        (status = 200, description = "Backup imported", body = ApiResponse<ImportResultDto>),
        (status = 400, description = "Malformed backup or duplicate ids"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "database",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn import_database(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<DatabaseService>>,
    AppJson(snapshot): AppJson<DatabaseSnapshot>,
) -> Result<Json<ApiResponse<ImportResultDto>>> {
    let result = service.import(snapshot).await?;
    tracing::info!("Database import by {}", admin.username);
    Ok(Json(ApiResponse::success(Some(result), None, None)))
}

/// Wipe all data and seed again; every session is closed
#[utoipa::path(
    post,
    path = "/api/database/reset",
    responses(
        (status = 200, description = "Database reset", body = ApiResponse<ResetResultDto>),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "database",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn reset_database(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<DatabaseService>>,
) -> Result<Json<ApiResponse<ResetResultDto>>> {
    tracing::warn!("Database reset requested by {}", admin.username);
    let report = service.reset().await?;
    Ok(Json(ApiResponse::success(
        Some(report.into()),
        Some("Database reset to seed data".to_string()),
        None,
    )))
}
