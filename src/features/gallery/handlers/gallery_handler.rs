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
use crate::features::gallery::dtos::{CreateImageDto, UpdateImageDto};
use crate::features::gallery::models::GalleryImage;
use crate::features::gallery::services::GalleryService;
use crate::shared::filtering::{ListQuery, PublicListQuery, SearchQuery};
use crate::shared::types::{ApiResponse, Meta, ReorderDto, ReorderResultDto};

/// List gallery images
#[utoipa::path(
    get,
    path = "/api/database/gallery",
    params(ListQuery),
    responses(
        (status = 200, description = "Images retrieved successfully", body = ApiResponse<Vec<GalleryImage>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "gallery",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_images(
    RequireViewer(_user): RequireViewer,
    State(service): State<Arc<GalleryService>>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<ApiResponse<Vec<GalleryImage>>>> {
    let (images, total) = service.list(&query).await?;
    Ok(Json(ApiResponse::success(
        Some(images),
        None,
        Some(Meta { total }),
    )))
}

/// Search images by title, description, alt text or tag
#[utoipa::path(
    get,
    path = "/api/database/gallery/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching images", body = ApiResponse<Vec<GalleryImage>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "gallery",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn search_images(
    RequireViewer(_user): RequireViewer,
    State(service): State<Arc<GalleryService>>,
    AppQuery(query): AppQuery<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<GalleryImage>>>> {
    let images = service.search(&query.q).await?;
    let total = images.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(images),
        None,
        Some(Meta { total }),
    )))
}

/// Active images for the public site
#[utoipa::path(
    get,
    path = "/api/gallery",
    params(PublicListQuery),
    responses(
        (status = 200, description = "Active images", body = ApiResponse<Vec<GalleryImage>>)
    ),
    tag = "public"
)]
pub async fn list_active_images(
    State(service): State<Arc<GalleryService>>,
    AppQuery(query): AppQuery<PublicListQuery>,
) -> Result<Json<ApiResponse<Vec<GalleryImage>>>> {
    let images = service.list_active(&query).await?;
    Ok(Json(ApiResponse::success(Some(images), None, None)))
}

/// Get an image by ID
#[utoipa::path(
    get,
    path = "/api/database/gallery/{id}",
    params(
        ("id" = i64, Path, description = "Image ID")
    ),
    responses(
        (status = 200, description = "Image retrieved successfully", body = ApiResponse<GalleryImage>),
        (status = 404, description = "Image not found")
    ),
    tag = "gallery",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_image(
    RequireViewer(_user): RequireViewer,
    State(service): State<Arc<GalleryService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<GalleryImage>>> {
    let found = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(found), None, None)))
}

/// Add an image to the gallery
#[utoipa::path(
    post,
    path = "/api/database/gallery",
    request_body = CreateImageDto,
    responses(
        (status = 201, description = "Image created successfully", body = ApiResponse<GalleryImage>),
        (status = 400, description = "Validation error or unknown category"),
        (status = 403, description = "Forbidden - editor or admin only")
    ),
    tag = "gallery",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_image(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<GalleryService>>,
    AppJson(dto): AppJson<CreateImageDto>,
) -> Result<(StatusCode, Json<ApiResponse<GalleryImage>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let created = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(created), None, None)),
    ))
}

/// Update image metadata
#[utoipa::path(
    put,
    path = "/api/database/gallery/{id}",
    params(
        ("id" = i64, Path, description = "Image ID")
    ),
    request_body = UpdateImageDto,
    responses(
        (status = 200, description = "Image updated successfully", body = ApiResponse<GalleryImage>),
        (status = 400, description = "Validation error or unknown category"),
        (status = 404, description = "Image not found"),
        (status = 403, description = "Forbidden - editor or admin only")
    ),
    tag = "gallery",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_image(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<GalleryService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateImageDto>,
) -> Result<Json<ApiResponse<GalleryImage>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let updated = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(updated), None, None)))
}

/// Hide an image (soft delete)
#[utoipa::path(
    delete,
    path = "/api/database/gallery/{id}",
    params(
        ("id" = i64, Path, description = "Image ID")
    ),
    responses(
        (status = 200, description = "Image hidden", body = ApiResponse<GalleryImage>),
        (status = 404, description = "Image not found"),
        (status = 403, description = "Forbidden - editor or admin only")
    ),
    tag = "gallery",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_image(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<GalleryService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<GalleryImage>>> {
    let deleted = service.soft_delete(id).await?;
    Ok(Json(ApiResponse::success(Some(deleted), None, None)))
}

/// Restore a hidden image
#[utoipa::path(
    post,
    path = "/api/database/gallery/{id}/restore",
    params(
        ("id" = i64, Path, description = "Image ID")
    ),
    responses(
        (status = 200, description = "Image restored", body = ApiResponse<GalleryImage>),
        (status = 404, description = "Image not found"),
        (status = 403, description = "Forbidden - editor or admin only")
    ),
    tag = "gallery",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn restore_image(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<GalleryService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<GalleryImage>>> {
    let restored = service.restore(id).await?;
    Ok(Json(ApiResponse::success(Some(restored), None, None)))
}

/// Set the display order of images
#[utoipa::path(
    put,
    path = "/api/database/gallery/reorder",
    request_body = ReorderDto,
    responses(
        (status = 200, description = "Images reordered", body = ApiResponse<ReorderResultDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - editor or admin only")
    ),
    tag = "gallery",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn reorder_images(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<GalleryService>>,
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
