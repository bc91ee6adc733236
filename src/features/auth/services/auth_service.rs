use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{LoginRequestDto, LoginResponseDto};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::SessionStore;
use crate::features::users::dtos::UserResponseDto;
use crate::features::users::UserService;

/// Service for back-office login, logout and identity lookups
pub struct AuthService {
    users: Arc<UserService>,
    sessions: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(users: Arc<UserService>, sessions: Arc<SessionStore>) -> Self {
        Self { users, sessions }
    }

    /// Check username and cedula against active users and open a session
    pub async fn login(&self, dto: LoginRequestDto) -> Result<LoginResponseDto> {
        let user = self
            .users
            .authenticate(&dto.username, dto.cedula.trim())
            .await?
            .ok_or_else(|| {
                tracing::warn!("Failed login attempt for username '{}'", dto.username);
                AppError::Unauthorized("Invalid username or cedula".to_string())
            })?;

        let identity = AuthenticatedUser::from(&user);
        let (token, expires_at) = self.sessions.create(identity.clone()).await;

        tracing::info!(
            "User {} logged in as {}",
            identity.username,
            identity.role.as_str()
        );

        Ok(LoginResponseDto {
            access_token: token,
            token_type: "Bearer".to_string(),
            expires_in: self.sessions.idle_timeout().as_secs() as i64,
            expires_at,
            user: identity,
        })
    }

    pub async fn logout(&self, token: &str) -> bool {
        self.sessions.revoke(token).await
    }

    /// Current stored profile of the signed-in user
    pub async fn me(&self, user: &AuthenticatedUser) -> Result<UserResponseDto> {
        self.users
            .find_active(user.user_id)
            .await?
            .map(UserResponseDto::from)
            .ok_or_else(|| AppError::Unauthorized("Account is no longer active".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::dtos::CreateUserDto;
    use crate::features::users::models::Role;
    use crate::shared::constants::USERS_COLLECTION;
    use crate::shared::entity::EntityStore;
    use crate::shared::test_helpers::memory_backend;
    use std::time::Duration;

    async fn setup() -> (AuthService, Arc<SessionStore>) {
        let sessions = Arc::new(SessionStore::new(Duration::from_secs(300)));
        let store = Arc::new(EntityStore::new(memory_backend(), USERS_COLLECTION));
        let users = Arc::new(UserService::new(store, Arc::clone(&sessions)));

        users
            .create(CreateUserDto {
                username: "Valentina".to_string(),
                cedula: "1098765432".to_string(),
                full_name: "Valentina Ríos".to_string(),
                role: Role::Editor,
            })
            .await
            .unwrap();

        (AuthService::new(users, Arc::clone(&sessions)), sessions)
    }

    fn login_dto(username: &str, cedula: &str) -> LoginRequestDto {
        LoginRequestDto {
            username: username.to_string(),
            cedula: cedula.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_issues_a_valid_session() {
        let (service, sessions) = setup().await;

        let response = service
            .login(login_dto("valentina", "1098765432"))
            .await
            .unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 300);
        assert_eq!(response.user.role, Role::Editor);

        let user = sessions.validate(&response.access_token).await.unwrap();
        assert_eq!(user.username, "Valentina");

        let me = service.me(&user).await.unwrap();
        assert!(me.last_login.is_some());
    }

    #[tokio::test]
    async fn test_wrong_cedula_is_unauthorized() {
        let (service, _) = setup().await;
        let result = service.login(login_dto("valentina", "0000000000")).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_logout_revokes_token() {
        let (service, sessions) = setup().await;
        let response = service
            .login(login_dto("VALENTINA", "1098765432"))
            .await
            .unwrap();

        assert!(service.logout(&response.access_token).await);
        assert!(sessions.validate(&response.access_token).await.is_none());
    }
}
