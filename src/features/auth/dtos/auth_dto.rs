use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::auth::model::AuthenticatedUser;

/// Request DTO for back-office login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(length(min = 1, max = 50, message = "Username is required"))]
    pub username: String,

    /// National ID number, compared exactly
    #[validate(length(min = 1, max = 20, message = "Cedula is required"))]
    pub cedula: String,
}

/// Response DTO for a successful login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseDto {
    /// Opaque session token, sent back as `Authorization: Bearer <token>`
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Idle timeout in seconds; each authenticated request restarts it
    pub expires_in: i64,
    pub expires_at: DateTime<Utc>,
    pub user: AuthenticatedUser,
}
