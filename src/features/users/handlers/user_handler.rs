use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::RequireAdmin;
use crate::features::users::dtos::{
    CreateUserDto, UpdateUserDto, UserQueryParams, UserResponseDto,
};
use crate::features::users::services::UserService;
use crate::shared::types::{ApiResponse, Meta};

/// List back-office users (admin only)
#[utoipa::path(
    get,
    path = "/api/database/users",
    params(UserQueryParams),
    responses(
        (status = 200, description = "Users retrieved successfully", body = ApiResponse<Vec<UserResponseDto>>),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_users(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<UserService>>,
    AppQuery(params): AppQuery<UserQueryParams>,
) -> Result<Json<ApiResponse<Vec<UserResponseDto>>>> {
    let (users, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::success(
        Some(users),
        None,
        Some(Meta { total }),
    )))
}

/// Get a user by ID (admin only)
#[utoipa::path(
    get,
    path = "/api/database/users/{id}",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User retrieved successfully", body = ApiResponse<UserResponseDto>),
        (status = 404, description = "User not found"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_user(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<UserService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let user = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(user), None, None)))
}

/// Create a user (admin only)
#[utoipa::path(
    post,
    path = "/api/database/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created successfully", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username already in use"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_user(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<CreateUserDto>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(user), None, None)),
    ))
}

/// Update a user (admin only)
#[utoipa::path(
    put,
    path = "/api/database/users/{id}",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated successfully", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation error or self deactivation/demotion"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username already in use"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_user(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<UserService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateUserDto>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = service.update(id, dto, admin.user_id).await?;
    Ok(Json(ApiResponse::success(Some(user), None, None)))
}

/// Deactivate a user (soft delete, admin only)
#[utoipa::path(
    delete,
    path = "/api/database/users/{id}",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deactivated"),
        (status = 400, description = "Cannot deactivate own account"),
        (status = 404, description = "User not found"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_user(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<UserService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.soft_delete(id, user.user_id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

/// Reactivate a user (admin only)
#[utoipa::path(
    post,
    path = "/api/database/users/{id}/restore",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User restored", body = ApiResponse<UserResponseDto>),
        (status = 404, description = "User not found"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn restore_user(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<UserService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let user = service.restore(id).await?;
    Ok(Json(ApiResponse::success(Some(user), None, None)))
}
