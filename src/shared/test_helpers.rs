#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;
#[cfg(test)]
use crate::features::users::models::Role;
#[cfg(test)]
use crate::modules::storage::{MemoryStorage, StorageBackend};

#[cfg(test)]
use axum::{extract::Request, middleware::Next, Router};

/// Fresh in-memory SQLite database with migrations applied
#[cfg(test)]
pub async fn sqlite_memory_pool() -> sqlx::SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");

    crate::core::database::run_migrations(&pool)
        .await
        .expect("migrations");
    pool
}

#[cfg(test)]
pub fn memory_backend() -> Arc<dyn StorageBackend> {
    Arc::new(MemoryStorage::new())
}

#[cfg(test)]
pub fn create_test_user(role: Role) -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: 1000,
        username: "test".to_string(),
        full_name: "Test User".to_string(),
        role,
    }
}

/// Inject an authenticated user with `role` into every request
#[cfg(test)]
pub fn with_role(router: Router, role: Role) -> Router {
    let user = create_test_user(role);
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let user = user.clone();
            async move {
                request.extensions_mut().insert(user);
                next.run(request).await
            }
        },
    ))
}

#[cfg(test)]
pub fn with_admin_auth(router: Router) -> Router {
    with_role(router, Role::Admin)
}
