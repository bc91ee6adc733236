use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::features::auth::model::AuthenticatedUser;

struct Session {
    user: AuthenticatedUser,
    last_seen: Instant,
}

/// Opaque bearer tokens held in process memory.
///
/// A session expires after `idle_timeout` without a validated request;
/// every successful validation pushes the expiry forward.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    idle_timeout: Duration,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("idle_timeout", &self.idle_timeout)
            .finish()
    }
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Start a session and return its token with the wall-clock expiry
    pub async fn create(&self, user: AuthenticatedUser) -> (String, DateTime<Utc>) {
        let token = Uuid::new_v4().simple().to_string();
        let mut sessions = self.sessions.write().await;

        sessions.retain(|_, s| !self.is_expired(s));
        sessions.insert(
            token.clone(),
            Session {
                user,
                last_seen: Instant::now(),
            },
        );

        (token, self.expires_at())
    }

    /// Resolve a token to its user, refreshing the idle timer
    pub async fn validate(&self, token: &str) -> Option<AuthenticatedUser> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(token)?;

        if self.is_expired(session) {
            sessions.remove(token);
            tracing::debug!("Session expired");
            return None;
        }

        session.last_seen = Instant::now();
        Some(session.user.clone())
    }

    pub async fn revoke(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Drop every session belonging to `user_id`; returns how many were dropped
    pub async fn revoke_user(&self, user_id: i64) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.user.user_id != user_id);
        before - sessions.len()
    }

    /// Log everyone out, e.g. after the user collection was replaced
    pub async fn revoke_all(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let count = sessions.len();
        sessions.clear();
        count
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc::now() + chrono::Duration::seconds(self.idle_timeout.as_secs() as i64)
    }

    fn is_expired(&self, session: &Session) -> bool {
        session.last_seen.elapsed() >= self.idle_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::models::Role;
    use crate::shared::test_helpers::create_test_user;

    #[tokio::test]
    async fn test_session_round_trip_and_revoke() {
        let store = SessionStore::new(Duration::from_secs(60));
        let (token, expires_at) = store.create(create_test_user(Role::Editor)).await;

        assert!(expires_at > Utc::now());
        let user = store.validate(&token).await.unwrap();
        assert_eq!(user.role, Role::Editor);

        assert!(store.revoke(&token).await);
        assert!(store.validate(&token).await.is_none());
        assert!(!store.revoke(&token).await);
    }

    #[tokio::test]
    async fn test_idle_session_expires() {
        let store = SessionStore::new(Duration::ZERO);
        let (token, _) = store.create(create_test_user(Role::Admin)).await;

        assert!(store.validate(&token).await.is_none());
    }

    #[tokio::test]
    async fn test_revoke_all() {
        let store = SessionStore::new(Duration::from_secs(60));
        let (token, _) = store.create(create_test_user(Role::Admin)).await;
        store.create(create_test_user(Role::Viewer)).await;

        assert_eq!(store.revoke_all().await, 2);
        assert!(store.validate(&token).await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_token_is_rejected() {
        let store = SessionStore::new(Duration::from_secs(60));
        assert!(store.validate("not-a-session").await.is_none());
    }

    #[tokio::test]
    async fn test_revoke_user_drops_all_sessions() {
        let store = SessionStore::new(Duration::from_secs(60));
        let (first, _) = store.create(create_test_user(Role::Viewer)).await;
        let (second, _) = store.create(create_test_user(Role::Viewer)).await;

        let user_id = create_test_user(Role::Viewer).user_id;
        assert_eq!(store.revoke_user(user_id).await, 2);
        assert!(store.validate(&first).await.is_none());
        assert!(store.validate(&second).await.is_none());
    }
}
