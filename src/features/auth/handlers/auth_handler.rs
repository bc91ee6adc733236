use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, BearerToken};
use crate::features::auth::dtos::{LoginRequestDto, LoginResponseDto};
use crate::features::auth::guards::RequireViewer;
use crate::features::auth::services::AuthService;
use crate::features::users::dtos::UserResponseDto;
use crate::shared::types::ApiResponse;
use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

/// Login with username and cedula
#[utoipa::path(
    post,
    path = "/api/database/auth",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials or inactive user")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<LoginResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.login(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(response),
        Some("Login successful".to_string()),
        None,
    )))
}

/// End the current session
#[utoipa::path(
    post,
    path = "/api/database/logout",
    responses(
        (status = 200, description = "Session closed"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(
    State(service): State<Arc<AuthService>>,
    RequireViewer(user): RequireViewer,
    BearerToken(token): BearerToken,
) -> Result<Json<ApiResponse<()>>> {
    service.logout(&token).await;
    tracing::info!("User {} logged out", user.username);
    Ok(Json(ApiResponse::success(
        None,
        Some("Logged out".to_string()),
        None,
    )))
}

/// Get the signed-in user
#[utoipa::path(
    get,
    path = "/api/database/me",
    responses(
        (status = 200, description = "Current user retrieved successfully", body = ApiResponse<UserResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(
    State(service): State<Arc<AuthService>>,
    RequireViewer(user): RequireViewer,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let me = service.me(&user).await?;
    Ok(Json(ApiResponse::success(Some(me), None, None)))
}
