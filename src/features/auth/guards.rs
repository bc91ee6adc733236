//! Role-based authorization guards for the back-office.
//!
//! These guards read the `AuthenticatedUser` placed in the request
//! extensions by `auth_middleware` and check its role.
//!
//! Role hierarchy (from highest to lowest):
//! - admin: manages users and the database tools
//! - editor: edits services, tips, gallery, categories and messages
//! - viewer: read-only access to the back-office
//!
//! Each higher role includes all permissions of lower roles.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::models::Role;
use axum::{extract::FromRequestParts, http::request::Parts};

fn require_role(parts: &Parts, role: Role) -> Result<AuthenticatedUser, AppError> {
    let user = parts
        .extensions
        .get::<AuthenticatedUser>()
        .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

    if !user.has_at_least(role) {
        return Err(AppError::Forbidden(format!(
            "{} access required",
            role.as_str()
        )));
    }

    Ok(user.clone())
}

/// Guard for admin-only routes.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, Role::Admin).map(RequireAdmin)
    }
}

/// Guard for content changes; allows admins and editors.
pub struct RequireEditor(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireEditor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, Role::Editor).map(RequireEditor)
    }
}

/// Guard for read access; any signed-in role passes.
pub struct RequireViewer(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireViewer
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, Role::Viewer).map(RequireViewer)
    }
}
