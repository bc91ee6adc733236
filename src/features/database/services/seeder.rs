use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::core::error::Result;
use crate::features::database::models::fixtures::{
    GALLERY_FIXTURE, SERVICES_FIXTURE, TIPS_FIXTURE, USERS_FIXTURE,
};
use crate::features::database::models::{
    GalleryFixture, ServicesFixture, TipsFixture, UsersFixture,
};
use crate::features::database::services::DataStores;

/// What a seeding pass wrote
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub seeded: Vec<&'static str>,
}

/// Fills collections that have never been written from fixture files
pub struct Seeder {
    fixtures_dir: PathBuf,
}

impl Seeder {
    pub fn new(fixtures_dir: impl Into<PathBuf>) -> Self {
        Self {
            fixtures_dir: fixtures_dir.into(),
        }
    }

    pub fn fixtures_dir(&self) -> &Path {
        &self.fixtures_dir
    }

    /// Read a fixture, falling back to `T::default()` when it is missing or malformed
    pub async fn load_fixture<T>(&self, file: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let path = self.fixtures_dir.join(file);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    "Fixture {} not readable ({}), using built-in defaults",
                    path.display(),
                    e
                );
                return T::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(fixture) => fixture,
            Err(e) => {
                tracing::error!(
                    "Fixture {} is not valid ({}), using built-in defaults",
                    path.display(),
                    e
                );
                T::default()
            }
        }
    }

    /// Seed every never-written collection; collections with data (even empty) are kept
    pub async fn seed(&self, stores: &DataStores) -> Result<SeedReport> {
        let mut report = SeedReport::default();

        let services_missing = !stores.services.collection().is_seeded().await?;
        let categories_missing = !stores.service_categories.collection().is_seeded().await?;
        if services_missing || categories_missing {
            let fixture: ServicesFixture = self.load_fixture(SERVICES_FIXTURE).await;
            if services_missing {
                stores.services.replace_all(&fixture.services).await?;
                report.seeded.push("services");
            }
            if categories_missing {
                stores
                    .service_categories
                    .collection()
                    .replace(&fixture.categories)
                    .await?;
                report.seeded.push("service categories");
            }
        }

        let tips_missing = !stores.tips.collection().is_seeded().await?;
        let categories_missing = !stores.tip_categories.collection().is_seeded().await?;
        if tips_missing || categories_missing {
            let fixture: TipsFixture = self.load_fixture(TIPS_FIXTURE).await;
            if tips_missing {
                stores.tips.replace_all(&fixture.tips).await?;
                report.seeded.push("tips");
            }
            if categories_missing {
                stores
                    .tip_categories
                    .collection()
                    .replace(&fixture.categories)
                    .await?;
                report.seeded.push("tip categories");
            }
        }

        let gallery_missing = !stores.gallery.collection().is_seeded().await?;
        let categories_missing = !stores.gallery_categories.collection().is_seeded().await?;
        if gallery_missing || categories_missing {
            let fixture: GalleryFixture = self.load_fixture(GALLERY_FIXTURE).await;
            if gallery_missing {
                stores.gallery.replace_all(&fixture.images).await?;
                report.seeded.push("gallery");
            }
            if categories_missing {
                stores
                    .gallery_categories
                    .collection()
                    .replace(&fixture.categories)
                    .await?;
                report.seeded.push("gallery categories");
            }
        }

        if !stores.users.collection().is_seeded().await? {
            let fixture: UsersFixture = self.load_fixture(USERS_FIXTURE).await;
            stores.users.replace_all(&fixture.users).await?;
            report.seeded.push("users");
        }

        if !stores.messages.collection().is_seeded().await? {
            stores.messages.replace_all(&[]).await?;
            report.seeded.push("messages");
        }

        if !report.seeded.is_empty() {
            tracing::info!("Seeded collections: {}", report.seeded.join(", "));
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::dtos::CreateCategoryDto;
    use crate::shared::test_helpers::memory_backend;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "sabores-seed-{}-{}",
            name,
            uuid::Uuid::new_v4()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_missing_fixtures_fall_back_to_defaults() {
        let stores = DataStores::new(memory_backend());
        let seeder = Seeder::new(temp_dir("missing"));

        let report = seeder.seed(&stores).await.unwrap();

        assert!(report.seeded.contains(&"services"));
        assert_eq!(stores.services.count().await.unwrap().total, 3);
        assert_eq!(stores.tip_categories.list().await.unwrap().len(), 7);
        assert_eq!(stores.users.all().await.unwrap()[0].username, "admin");
    }

    #[tokio::test]
    async fn test_fixture_file_is_used_and_bad_file_falls_back() {
        let dir = temp_dir("files");
        std::fs::write(
            dir.join(TIPS_FIXTURE),
            r##"{"tips": [{"id": 9, "title": "Caldo", "content": "Espuma", "category": "sopas", "difficulty": "media"}],
                "categories": [{"id": "sopas", "name": "Sopas", "color": "#123456"}]}"##,
        )
        .unwrap();
        std::fs::write(dir.join(GALLERY_FIXTURE), "{ not json").unwrap();

        let stores = DataStores::new(memory_backend());
        Seeder::new(&dir).seed(&stores).await.unwrap();

        let tips = stores.tips.all().await.unwrap();
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].id, 9);
        assert_eq!(stores.tip_categories.list().await.unwrap()[0].id, "sopas");
        assert_eq!(stores.gallery.count().await.unwrap().total, 3);
    }

    #[tokio::test]
    async fn test_seed_never_overwrites_written_collections() {
        let stores = DataStores::new(memory_backend());
        stores.services.replace_all(&[]).await.unwrap();
        stores
            .tip_categories
            .create(CreateCategoryDto {
                id: Some("propias".to_string()),
                name: "Propias".to_string(),
                color: None,
            })
            .await
            .unwrap();

        let report = Seeder::new(temp_dir("kept")).seed(&stores).await.unwrap();

        assert!(!report.seeded.contains(&"services"));
        assert!(report.seeded.contains(&"tips"));
        assert!(!report.seeded.contains(&"tip categories"));
        assert_eq!(stores.services.count().await.unwrap().total, 0);
        assert_eq!(stores.tip_categories.list().await.unwrap().len(), 1);

        let again = Seeder::new(temp_dir("kept")).seed(&stores).await.unwrap();
        assert!(again.seeded.is_empty());
    }

    #[tokio::test]
    async fn test_categories_are_seeded_even_when_records_exist() {
        let stores = DataStores::new(memory_backend());
        stores.services.replace_all(&[]).await.unwrap();

        let report = Seeder::new(temp_dir("categories")).seed(&stores).await.unwrap();

        assert!(!report.seeded.contains(&"services"));
        assert!(report.seeded.contains(&"service categories"));
        assert_eq!(stores.service_categories.list().await.unwrap().len(), 3);
        assert_eq!(stores.services.count().await.unwrap().total, 0);
    }
}
