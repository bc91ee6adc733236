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
use crate::features::tips::dtos::{CreateTipDto, UpdateTipDto};
use crate::features::tips::models::CookingTip;
use crate::features::tips::services::TipService;
use crate::shared::filtering::{ListQuery, PublicListQuery, SearchQuery};
use crate::shared::types::{ApiResponse, Meta, ReorderDto, ReorderResultDto};

/// List cooking tips with status, category and search filters
#[utoipa::path(
    get,
    path = "/api/database/tips",
    params(ListQuery),
    responses(
        (status = 200, description = "Tips retrieved successfully", body = ApiResponse<Vec<CookingTip>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "tips",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_tips(
    RequireViewer(_user): RequireViewer,
    State(service): State<Arc<TipService>>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<ApiResponse<Vec<CookingTip>>>> {
    let (tips, total) = service.list(&query).await?;
    Ok(Json(ApiResponse::success(
        Some(tips),
        None,
        Some(Meta { total }),
    )))
}

/// Search tips by title, content, category or tag
#[utoipa::path(
    get,
    path = "/api/database/tips/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching tips", body = ApiResponse<Vec<CookingTip>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "tips",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn search_tips(
    RequireViewer(_user): RequireViewer,
    State(service): State<Arc<TipService>>,
    AppQuery(query): AppQuery<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<CookingTip>>>> {
    let tips = service.search(&query.q).await?;
    let total = tips.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(tips),
        None,
        Some(Meta { total }),
    )))
}

/// Active tips for the public site
#[utoipa::path(
    get,
    path = "/api/tips",
    params(PublicListQuery),
    responses(
        (status = 200, description = "Active tips", body = ApiResponse<Vec<CookingTip>>)
    ),
    tag = "public"
)]
pub async fn list_active_tips(
    State(service): State<Arc<TipService>>,
    AppQuery(query): AppQuery<PublicListQuery>,
) -> Result<Json<ApiResponse<Vec<CookingTip>>>> {
    let tips = service.list_active(&query).await?;
    Ok(Json(ApiResponse::success(Some(tips), None, None)))
}

/// Get a tip by ID
#[utoipa::path(
    get,
    path = "/api/database/tips/{id}",
    params(
        ("id" = i64, Path, description = "Tip ID")
    ),
    responses(
        (status = 200, description = "Tip retrieved successfully", body = ApiResponse<CookingTip>),
        (status = 404, description = "Tip not found")
    ),
    tag = "tips",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_tip(
    RequireViewer(_user): RequireViewer,
    State(service): State<Arc<TipService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CookingTip>>> {
    let found = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(found), None, None)))
}

/// Create a cooking tip
#[utoipa::path(
    post,
    path = "/api/database/tips",
    request_body = CreateTipDto,
    responses(
        (status = 201, description = "Tip created successfully", body = ApiResponse<CookingTip>),
        (status = 400, description = "Validation error or unknown category"),
        (status = 403, description = "Forbidden - editor or admin only")
    ),
    tag = "tips",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_tip(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<TipService>>,
    AppJson(dto): AppJson<CreateTipDto>,
) -> Result<(StatusCode, Json<ApiResponse<CookingTip>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let created = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(created), None, None)),
    ))
}

/// Update a tip (partial, tags are replaced)
#[utoipa::path(
    put,
    path = "/api/database/tips/{id}",
    params(
        ("id" = i64, Path, description = "Tip ID")
    ),
    request_body = UpdateTipDto,
    responses(
        (status = 200, description = "Tip updated successfully", body = ApiResponse<CookingTip>),
        (status = 400, description = "Validation error or unknown category"),
        (status = 404, description = "Tip not found"),
        (status = 403, description = "Forbidden - editor or admin only")
    ),
    tag = "tips",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_tip(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<TipService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateTipDto>,
) -> Result<Json<ApiResponse<CookingTip>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let updated = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(updated), None, None)))
}

/// Soft delete a tip
#[utoipa::path(
    delete,
    path = "/api/database/tips/{id}",
    params(
        ("id" = i64, Path, description = "Tip ID")
    ),
    responses(
        (status = 200, description = "Tip deactivated", body = ApiResponse<CookingTip>),
        (status = 404, description = "Tip not found"),
        (status = 403, description = "Forbidden - editor or admin only")
    ),
    tag = "tips",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_tip(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<TipService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CookingTip>>> {
    let deleted = service.soft_delete(id).await?;
    Ok(Json(ApiResponse::success(Some(deleted), None, None)))
}

/// Restore a soft-deleted tip
#[utoipa::path(
    post,
    path = "/api/database/tips/{id}/restore",
    params(
        ("id" = i64, Path, description = "Tip ID")
    ),
    responses(
        (status = 200, description = "Tip restored", body = ApiResponse<CookingTip>),
        (status = 404, description = "Tip not found"),
        (status = 403, description = "Forbidden - editor or admin only")
    ),
    tag = "tips",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn restore_tip(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<TipService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CookingTip>>> {
    let restored = service.restore(id).await?;
    Ok(Json(ApiResponse::success(Some(restored), None, None)))
}

/// Set the display order of tips
#[utoipa::path(
    put,
    path = "/api/database/tips/reorder",
    request_body = ReorderDto,
    responses(
        (status = 200, description = "Tips reordered", body = ApiResponse<ReorderResultDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - editor or admin only")
    ),
    tag = "tips",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn reorder_tips(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<TipService>>,
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
