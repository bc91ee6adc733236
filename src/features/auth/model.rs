use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::users::models::{Role, User};

/// Identity attached to a request once its session token checks out
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub username: String,
    pub full_name: String,
    pub role: Role,
}

impl AuthenticatedUser {
    /// Check if the user's role is `role` or higher
    pub fn has_at_least(&self, role: Role) -> bool {
        self.role >= role
    }

    pub fn is_admin(&self) -> bool {
        self.has_at_least(Role::Admin)
    }

    /// Admins and editors may change site content
    pub fn can_edit(&self) -> bool {
        self.has_at_least(Role::Editor)
    }
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::create_test_user;

    #[test]
    fn test_role_hierarchy() {
        let admin = create_test_user(Role::Admin);
        assert!(admin.is_admin());
        assert!(admin.can_edit());

        let editor = create_test_user(Role::Editor);
        assert!(!editor.is_admin());
        assert!(editor.can_edit());

        let viewer = create_test_user(Role::Viewer);
        assert!(!viewer.can_edit());
        assert!(viewer.has_at_least(Role::Viewer));
    }
}
