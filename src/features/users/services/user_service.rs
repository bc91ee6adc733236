use std::sync::Arc;

use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::auth::SessionStore;
use crate::features::users::dtos::{
    CreateUserDto, UpdateUserDto, UserQueryParams, UserResponseDto,
};
use crate::features::users::models::User;
use crate::shared::entity::{Entity, EntityStore};
use crate::shared::filtering::normalize_term;

fn ensure_unique_username(users: &[User], username: &str, except_id: Option<i64>) -> Result<()> {
    let taken = users
        .iter()
        .any(|u| Some(u.id) != except_id && u.username_matches(username));

    if taken {
        return Err(AppError::Conflict(format!(
            "Username '{}' is already in use",
            username.trim()
        )));
    }
    Ok(())
}

pub struct UserService {
    store: Arc<EntityStore<User>>,
    sessions: Arc<SessionStore>,
}

impl UserService {
    pub fn new(store: Arc<EntityStore<User>>, sessions: Arc<SessionStore>) -> Self {
        Self { store, sessions }
    }

    pub async fn list(&self, params: &UserQueryParams) -> Result<(Vec<UserResponseDto>, i64)> {
        let term = normalize_term(params.search.as_deref());

        let users = self
            .store
            .filter(|u| {
                params.status.accepts(u.active, false)
                    && params.role.is_none_or(|r| u.role == r)
                    && term.as_deref().is_none_or(|t| u.matches(t))
            })
            .await?;

        let (page, total) = params.pagination().apply(users);
        Ok((page.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<UserResponseDto> {
        Ok(self.store.get_by_id(id).await?.into())
    }

    pub async fn create(&self, dto: CreateUserDto) -> Result<UserResponseDto> {
        let user = self
            .store
            .create(|users, id, now| {
                ensure_unique_username(users, &dto.username, None)?;
                Ok(User {
                    id,
                    username: dto.username.trim().to_string(),
                    cedula: dto.cedula,
                    full_name: dto.full_name.trim().to_string(),
                    role: dto.role,
                    active: true,
                    last_login: None,
                    created_at: Some(now),
                    updated_at: Some(now),
                })
            })
            .await?;

        tracing::info!("Created user {} ({})", user.username, user.role.as_str());
        Ok(user.into())
    }

    /// Patch a user; `acting_user_id` may not deactivate or demote itself
    pub async fn update(
        &self,
        id: i64,
        dto: UpdateUserDto,
        acting_user_id: i64,
    ) -> Result<UserResponseDto> {
        let changes_access = dto.cedula.is_some() || dto.role.is_some() || dto.active.is_some();

        let user = self
            .store
            .update(id, |user, users| {
                if id == acting_user_id {
                    if dto.active == Some(false) {
                        return Err(AppError::BadRequest(
                            "You cannot deactivate your own account".to_string(),
                        ));
                    }
                    if dto.role.is_some_and(|role| role < user.role) {
                        return Err(AppError::BadRequest(
                            "You cannot lower your own role".to_string(),
                        ));
                    }
                }
                if let Some(username) = dto.username {
                    ensure_unique_username(users, &username, Some(id))?;
                    user.username = username.trim().to_string();
                }
                if let Some(cedula) = dto.cedula {
                    user.cedula = cedula;
                }
                if let Some(full_name) = dto.full_name {
                    user.full_name = full_name.trim().to_string();
                }
                if let Some(role) = dto.role {
                    user.role = role;
                }
                if let Some(active) = dto.active {
                    user.active = active;
                }
                Ok(())
            })
            .await?;

        if changes_access {
            let dropped = self.sessions.revoke_user(id).await;
            tracing::info!("Access for user {} changed, {} session(s) revoked", id, dropped);
        }

        Ok(user.into())
    }

    pub async fn soft_delete(&self, id: i64, acting_user_id: i64) -> Result<()> {
        if id == acting_user_id {
            return Err(AppError::BadRequest(
                "You cannot deactivate your own account".to_string(),
            ));
        }
        self.store.soft_delete(id).await?;
        self.sessions.revoke_user(id).await;
        Ok(())
    }

    pub async fn restore(&self, id: i64) -> Result<UserResponseDto> {
        Ok(self.store.restore(id).await?.into())
    }

    /// Match an active user by username (case-insensitive) and exact cedula,
    /// recording the login time on success
    pub async fn authenticate(&self, username: &str, cedula: &str) -> Result<Option<User>> {
        let Some(found) = self
            .store
            .all()
            .await?
            .into_iter()
            .find(|u| u.active && u.username_matches(username) && u.cedula == cedula)
        else {
            return Ok(None);
        };

        let user = self
            .store
            .update(found.id, |user, _| {
                user.last_login = Some(Utc::now());
                Ok(())
            })
            .await?;
        Ok(Some(user))
    }

    /// Active user by id, used to refresh session identity
    pub async fn find_active(&self, id: i64) -> Result<Option<User>> {
        match self.store.get_by_id(id).await {
            Ok(user) if user.active => Ok(Some(user)),
            Ok(_) | Err(AppError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
