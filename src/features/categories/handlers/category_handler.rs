use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::{RequireEditor, RequireViewer};
use crate::features::categories::dtos::{CreateCategoryDto, UpdateCategoryDto};
use crate::features::categories::models::Category;
use crate::features::categories::services::CategoryService;
use crate::shared::types::{ApiResponse, Meta};

/// List the categories of one catalog
#[utoipa::path(
    get,
    path = "/api/database/{kind}/categories",
    params(
        ("kind" = String, Path, description = "services | tips | gallery")
    ),
    responses(
        (status = 200, description = "Categories retrieved successfully", body = ApiResponse<Vec<Category>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_categories(
    RequireViewer(_user): RequireViewer,
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<Category>>>> {
    let categories = service.list().await?;
    let total = categories.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(categories),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    get,
    path = "/api/database/{kind}/categories/{id}",
    params(
        ("kind" = String, Path, description = "services | tips | gallery"),
        ("id" = String, Path, description = "Category slug")
    ),
    responses(
        (status = 200, description = "Category retrieved successfully", body = ApiResponse<Category>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_category(
    RequireViewer(_user): RequireViewer,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Category>>> {
    let category = service.get(&id).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Create a category; the slug is generated when `id` is omitted
#[utoipa::path(
    post,
    path = "/api/database/{kind}/categories",
    params(
        ("kind" = String, Path, description = "services | tips | gallery")
    ),
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created successfully", body = ApiResponse<Category>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Category id already exists"),
        (status = 403, description = "Forbidden - editor or admin only")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_category(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<Category>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(category), None, None)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/database/{kind}/categories/{id}",
    params(
        ("kind" = String, Path, description = "services | tips | gallery"),
        ("id" = String, Path, description = "Category slug")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated successfully", body = ApiResponse<Category>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category not found"),
        (status = 403, description = "Forbidden - editor or admin only")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_category(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<Category>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.update(&id, dto).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Delete a category (hard delete, refused while active records use it)
#[utoipa::path(
    delete,
    path = "/api/database/{kind}/categories/{id}",
    params(
        ("kind" = String, Path, description = "services | tips | gallery"),
        ("id" = String, Path, description = "Category slug")
    ),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category still referenced by active records"),
        (status = 403, description = "Forbidden - editor or admin only")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_category(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some(format!("Category '{}' deleted", id)),
        None,
    )))
}
