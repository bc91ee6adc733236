use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::users::models::{Role, User};
use crate::shared::filtering::StatusFilter;
use crate::shared::types::{default_page, default_page_size, PaginationQuery};
use crate::shared::validation::CEDULA_REGEX;

/// Query params for listing users
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct UserQueryParams {
    /// all | active | inactive (default: all)
    #[serde(default)]
    #[param(inline)]
    pub status: StatusFilter,

    /// Only users with this role
    #[param(inline)]
    pub role: Option<Role>,

    /// Search in username and full name
    pub search: Option<String>,

    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    #[serde(default = "default_page_size", alias = "page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
}

impl UserQueryParams {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery::new(self.page, self.page_size)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[validate(length(min = 2, max = 50))]
    pub username: String,

    #[validate(regex(path = *CEDULA_REGEX, message = "cedula must be 4 to 20 digits"))]
    pub cedula: String,

    #[validate(length(min = 1, max = 120))]
    pub full_name: String,

    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    #[validate(length(min = 2, max = 50))]
    pub username: Option<String>,

    #[validate(regex(path = *CEDULA_REGEX, message = "cedula must be 4 to 20 digits"))]
    pub cedula: Option<String>,

    #[validate(length(min = 1, max = 120))]
    pub full_name: Option<String>,

    pub role: Option<Role>,

    pub active: Option<bool>,
}

/// User as returned by the API; the cedula never leaves the server
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseDto {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            full_name: u.full_name,
            role: u.role,
            active: u.active,
            last_login: u.last_login,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}
