use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::{RequireEditor, RequireViewer};
use crate::features::services::dtos::{CreateServiceDto, UpdateServiceDto};
use crate::features::services::models::Service;
use crate::features::services::services::ServiceCatalogService;
use crate::shared::filtering::{ListQuery, PublicListQuery, SearchQuery};
use crate::shared::types::{ApiResponse, Meta, ReorderDto, ReorderResultDto};

/// List services with status, category and search filters
#[utoipa::path(
    get,
    path = "/api/database/services",
    params(ListQuery),
    responses(
        (status = 200, description = "Services retrieved successfully", body = ApiResponse<Vec<Service>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "services",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_services(
    RequireViewer(_user): RequireViewer,
    State(service): State<Arc<ServiceCatalogService>>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<ApiResponse<Vec<Service>>>> {
    let (services, total) = service.list(&query).await?;
    Ok(Json(ApiResponse::success(
        Some(services),
        None,
        Some(Meta { total }),
    )))
}

/// Search all services, including inactive ones
#[utoipa::path(
    get,
    path = "/api/database/services/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching services", body = ApiResponse<Vec<Service>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "services",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn search_services(
    RequireViewer(_user): RequireViewer,
    State(service): State<Arc<ServiceCatalogService>>,
    AppQuery(query): AppQuery<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<Service>>>> {
    let services = service.search(&query.q).await?;
    let total = services.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(services),
        None,
        Some(Meta { total }),
    )))
}

/// Active services for the public site
#[utoipa::path(
    get,
    path = "/api/services",
    params(PublicListQuery),
    responses(
        (status = 200, description = "Active services", body = ApiResponse<Vec<Service>>)
    ),
    tag = "public"
)]
pub async fn list_active_services(
    State(service): State<Arc<ServiceCatalogService>>,
    AppQuery(query): AppQuery<PublicListQuery>,
) -> Result<Json<ApiResponse<Vec<Service>>>> {
    let services = service.list_active(&query).await?;
    Ok(Json(ApiResponse::success(Some(services), None, None)))
}

/// Get a service by ID, including inactive ones
#[utoipa::path(
    get,
    path = "/api/database/services/{id}",
    params(
        ("id" = i64, Path, description = "Service ID")
    ),
    responses(
        (status = 200, description = "Service retrieved successfully", body = ApiResponse<Service>),
        (status = 404, description = "Service not found")
    ),
    tag = "services",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_service(
    RequireViewer(_user): RequireViewer,
    State(service): State<Arc<ServiceCatalogService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Service>>> {
    let found = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(found), None, None)))
}

/// Create a service (editor or admin)
#[utoipa::path(
    post,
    path = "/api/database/services",
    request_body = CreateServiceDto,
    responses(
        (status = 201, description = "Service created successfully", body = ApiResponse<Service>),
        (status = 400, description = "Validation error or unknown category"),
        (status = 403, description = "Forbidden - editor or admin only")
    ),
    tag = "services",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_service(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<ServiceCatalogService>>,
    AppJson(dto): AppJson<CreateServiceDto>,
) -> Result<(StatusCode, Json<ApiResponse<Service>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let created = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(created), None, None)),
    ))
}

/// Update a service (partial)
#[utoipa::path(
    put,
    path = "/api/database/services/{id}",
    params(
        ("id" = i64, Path, description = "Service ID")
    ),
    request_body = UpdateServiceDto,
    responses(
        (status = 200, description = "Service updated successfully", body = ApiResponse<Service>),
        (status = 400, description = "Validation error or unknown category"),
        (status = 404, description = "Service not found"),
        (status = 403, description = "Forbidden - editor or admin only")
    ),
    tag = "services",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_service(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<ServiceCatalogService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateServiceDto>,
) -> Result<Json<ApiResponse<Service>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let updated = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(updated), None, None)))
}

/// Delete a service (soft delete)
#[utoipa::path(
    delete,
    path = "/api/database/services/{id}",
    params(
        ("id" = i64, Path, description = "Service ID")
    ),
    responses(
        (status = 200, description = "Service deactivated", body = ApiResponse<Service>),
        (status = 404, description = "Service not found"),
        (status = 403, description = "Forbidden - editor or admin only")
    ),
    tag = "services",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_service(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<ServiceCatalogService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Service>>> {
    let deleted = service.soft_delete(id).await?;
    Ok(Json(ApiResponse::success(Some(deleted), None, None)))
}

/// Restore a soft-deleted service
#[utoipa::path(
    post,
    path = "/api/database/services/{id}/restore",
    params(
        ("id" = i64, Path, description = "Service ID")
    ),
    responses(
        (status = 200, description = "Service restored", body = ApiResponse<Service>),
        (status = 404, description = "Service not found"),
        (status = 403, description = "Forbidden - editor or admin only")
    ),
    tag = "services",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn restore_service(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<ServiceCatalogService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Service>>> {
    let restored = service.restore(id).await?;
    Ok(Json(ApiResponse::success(Some(restored), None, None)))
}

/// Set the display order of services
#[utoipa::path(
    put,
    path = "/api/database/services/reorder",
    request_body = ReorderDto,
    responses(
        (status = 200, description = "Services reordered", body = ApiResponse<ReorderResultDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - editor or admin only")
    ),
    tag = "services",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn reorder_services(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<ServiceCatalogService>>,
    AppJson(dto): AppJson<ReorderDto>,
) -> Result<Json<ApiResponse<ReorderResultDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let moved = service.reorder(&dto.ids).await?;
    Ok(Json(ApiResponse::success(
        Some(ReorderResultDto { moved }),
        None,
        None,
    )))
}
