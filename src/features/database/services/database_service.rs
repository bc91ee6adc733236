use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::auth::SessionStore;
use crate::features::categories::models::Category;
use crate::features::database::dtos::ImportResultDto;
use crate::features::database::models::{CategoryTotals, DatabaseSnapshot, DatabaseStats};
use crate::features::database::services::{DataStores, SeedReport, Seeder};
use crate::features::users::models::Role;
use crate::shared::entity::Entity;

fn ensure_unique_ids<T: Entity>(records: &[T]) -> Result<()> {
    let mut seen = HashSet::new();
    if let Some(duplicate) = records.iter().map(Entity::id).find(|id| !seen.insert(*id)) {
        return Err(AppError::BadRequest(format!(
            "Duplicate {} id {} in import",
            T::LABEL.to_lowercase(),
            duplicate
        )));
    }
    Ok(())
}

fn ensure_unique_categories(categories: &[Category], label: &str) -> Result<()> {
    let mut seen = HashSet::new();
    if let Some(duplicate) = categories.iter().find(|c| !seen.insert(c.id.as_str())) {
        return Err(AppError::BadRequest(format!(
            "Duplicate {} category '{}' in import",
            label, duplicate.id
        )));
    }
    Ok(())
}

/// Whole-database maintenance: stats, backup, restore and reset
pub struct DatabaseService {
    stores: DataStores,
    seeder: Seeder,
    sessions: Arc<SessionStore>,
}

impl DatabaseService {
    pub fn new(stores: DataStores, seeder: Seeder, sessions: Arc<SessionStore>) -> Self {
        Self {
            stores,
            seeder,
            sessions,
        }
    }

    pub async fn stats(&self) -> Result<DatabaseStats> {
        let s = &self.stores;
        Ok(DatabaseStats {
            backend: s.backend.name().to_string(),
            services: s.services.count().await?,
            tips: s.tips.count().await?,
            gallery: s.gallery.count().await?,
            users: s.users.count().await?,
            messages: s.messages.count().await?,
            categories: CategoryTotals {
                services: s.service_categories.list().await?.len() as i64,
                tips: s.tip_categories.list().await?.len() as i64,
                gallery: s.gallery_categories.list().await?.len() as i64,
            },
        })
    }

    pub async fn export(&self) -> Result<DatabaseSnapshot> {
        let s = &self.stores;
        Ok(DatabaseSnapshot {
            services: Some(s.services.all().await?),
            categories: Some(s.service_categories.list().await?),
            tips: Some(s.tips.all().await?),
            tip_categories: Some(s.tip_categories.list().await?),
            gallery: Some(s.gallery.all().await?),
            gallery_categories: Some(s.gallery_categories.list().await?),
            users: Some(s.users.all().await?),
            messages: Some(s.messages.all().await?),
            exported_at: Some(Utc::now()),
        })
    }

    /// Replace every collection present in `snapshot`, keeping record ids
    pub async fn import(&self, snapshot: DatabaseSnapshot) -> Result<ImportResultDto> {
        self.validate_snapshot(&snapshot)?;

        let s = &self.stores;
        let mut result = ImportResultDto::default();

        if let Some(services) = snapshot.services {
            s.services.replace_all(&services).await?;
            result.record("services", services.len());
        }
        if let Some(categories) = snapshot.categories {
            s.service_categories.collection().replace(&categories).await?;
            result.record("categories", categories.len());
        }
        if let Some(tips) = snapshot.tips {
            s.tips.replace_all(&tips).await?;
            result.record("tips", tips.len());
        }
        if let Some(categories) = snapshot.tip_categories {
            s.tip_categories.collection().replace(&categories).await?;
            result.record("tipCategories", categories.len());
        }
        if let Some(images) = snapshot.gallery {
            s.gallery.replace_all(&images).await?;
            result.record("gallery", images.len());
        }
        if let Some(categories) = snapshot.gallery_categories {
            s.gallery_categories.collection().replace(&categories).await?;
            result.record("galleryCategories", categories.len());
        }
        if let Some(users) = snapshot.users {
            s.users.replace_all(&users).await?;
            result.record("users", users.len());
            let revoked = self.sessions.revoke_all().await;
            tracing::info!("User list replaced by import, {} sessions closed", revoked);
        }
        if let Some(messages) = snapshot.messages {
            s.messages.replace_all(&messages).await?;
            result.record("messages", messages.len());
        }

        tracing::info!(
            "Imported {} records into {} collections",
            result.records,
            result.collections.len()
        );
        Ok(result)
    }

    /// Wipe every collection and seed again from the fixtures
    pub async fn reset(&self) -> Result<SeedReport> {
        let s = &self.stores;
        s.services.collection().clear().await?;
        s.tips.collection().clear().await?;
        s.gallery.collection().clear().await?;
        s.users.collection().clear().await?;
        s.messages.collection().clear().await?;
        for categories in s.categories() {
            categories.collection().clear().await?;
        }
        self.sessions.revoke_all().await;

        tracing::warn!(
            "Database reset, re-seeding from {}",
            self.seeder.fixtures_dir().display()
        );
        self.seeder.seed(s).await
    }

    pub async fn seed(&self) -> Result<SeedReport> {
        self.seeder.seed(&self.stores).await
    }

    fn validate_snapshot(&self, snapshot: &DatabaseSnapshot) -> Result<()> {
        if let Some(services) = &snapshot.services {
            ensure_unique_ids(services)?;
        }
        if let Some(tips) = &snapshot.tips {
            ensure_unique_ids(tips)?;
        }
        if let Some(images) = &snapshot.gallery {
            ensure_unique_ids(images)?;
        }
        if let Some(users) = &snapshot.users {
            ensure_unique_ids(users)?;
            if !users.iter().any(|u| u.active && u.role == Role::Admin) {
                return Err(AppError::BadRequest(
                    "Imported users must include an active admin".to_string(),
                ));
            }
        }
        if let Some(messages) = &snapshot.messages {
            ensure_unique_ids(messages)?;
        }
        for (categories, label) in [
            (&snapshot.categories, "service"),
            (&snapshot.tip_categories, "tip"),
            (&snapshot.gallery_categories, "gallery"),
        ] {
            if let Some(categories) = categories {
                ensure_unique_categories(categories, label)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_test_user, memory_backend};
    use std::time::Duration;

    async fn service() -> (DatabaseService, DataStores, Arc<SessionStore>) {
        let stores = DataStores::new(memory_backend());
        let sessions = Arc::new(SessionStore::new(Duration::from_secs(60)));
        let dir = std::env::temp_dir().join(format!("sabores-db-{}", uuid::Uuid::new_v4()));
        let service = DatabaseService::new(stores.clone(), Seeder::new(dir), sessions.clone());
        service.seed().await.unwrap();
        (service, stores, sessions)
    }

    #[tokio::test]
    async fn test_stats_after_seed() {
        let (service, stores, _) = service().await;
        stores.tips.soft_delete(1).await.unwrap();

        let stats = service.stats().await.unwrap();
        assert_eq!(stats.backend, "memory");
        assert_eq!(stats.tips.total, 3);
        assert_eq!(stats.tips.active, 2);
        assert_eq!(stats.categories.gallery, 6);
        assert_eq!(stats.messages.total, 0);
    }

    #[tokio::test]
    async fn test_export_then_import_reproduces_records() {
        let (service, stores, _) = service().await;
        stores.services.soft_delete(2).await.unwrap();
        let exported = service.export().await.unwrap();
        let before = serde_json::to_value(&exported.services).unwrap();

        stores.services.remove_where(|_| true).await.unwrap();
        stores.tip_categories.collection().clear().await.unwrap();

        let result = service.import(exported.clone()).await.unwrap();
        assert_eq!(result.collections.len(), 8);

        let after = serde_json::to_value(Some(stores.services.all().await.unwrap())).unwrap();
        assert_eq!(before, after);
        assert_eq!(stores.tip_categories.list().await.unwrap().len(), 7);

        // importing twice is idempotent
        service.import(exported).await.unwrap();
        assert_eq!(stores.services.count().await.unwrap().total, 3);
    }

    #[tokio::test]
    async fn test_partial_import_keeps_other_collections() {
        let (service, stores, sessions) = service().await;
        let (token, _) = sessions.create(create_test_user(Role::Admin)).await;

        let snapshot: DatabaseSnapshot =
            serde_json::from_value(serde_json::json!({ "messages": [] })).unwrap();
        let result = service.import(snapshot).await.unwrap();

        assert_eq!(result.collections, vec!["messages"]);
        assert_eq!(stores.services.count().await.unwrap().total, 3);
        assert!(sessions.validate(&token).await.is_some());
    }

    #[tokio::test]
    async fn test_import_rejects_duplicate_ids_and_missing_admin() {
        let (service, stores, _) = service().await;
        let mut tips = stores.tips.all().await.unwrap();
        tips[1].id = tips[0].id;
        let duplicated = DatabaseSnapshot {
            tips: Some(tips),
            ..Default::default()
        };
        assert!(matches!(
            service.import(duplicated).await,
            Err(AppError::BadRequest(_))
        ));

        let no_admin = DatabaseSnapshot {
            users: Some(vec![]),
            ..Default::default()
        };
        assert!(matches!(
            service.import(no_admin).await,
            Err(AppError::BadRequest(_))
        ));
        assert_eq!(stores.tips.count().await.unwrap().total, 3);
    }

    #[tokio::test]
    async fn test_reset_restores_seed_data_and_logs_out() {
        let (service, stores, sessions) = service().await;
        let (token, _) = sessions.create(create_test_user(Role::Admin)).await;
        stores.services.remove_where(|_| true).await.unwrap();
        stores.service_categories.collection().replace(&[]).await.unwrap();

        service.reset().await.unwrap();

        assert_eq!(stores.services.count().await.unwrap().total, 3);
        assert_eq!(stores.service_categories.list().await.unwrap().len(), 3);
        assert!(sessions.validate(&token).await.is_none());
    }
}
