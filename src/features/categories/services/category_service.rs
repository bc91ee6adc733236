use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{RwLock, RwLockReadGuard};

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{CreateCategoryDto, UpdateCategoryDto};
use crate::features::categories::models::{generate_category_id, Category, CategoryKind};
use crate::modules::storage::{Collection, StorageBackend};
use crate::shared::constants::DEFAULT_CATEGORY_COLOR;
use crate::shared::entity::{Entity, EntityStore};

/// Answers whether a category is still in use by active records
#[async_trait]
pub trait CategoryReferences: Send + Sync {
    async fn has_active_in_category(&self, category: &str) -> Result<bool>;
}

#[async_trait]
impl<T: Entity> CategoryReferences for EntityStore<T> {
    async fn has_active_in_category(&self, category: &str) -> Result<bool> {
        EntityStore::has_active_in_category(self, category).await
    }
}

/// Categories of one catalog kind.
///
/// Record writers hold `usage` shared while they check and store a category
/// reference; `delete` holds it exclusively across its reference check.
pub struct CategoryService {
    kind: CategoryKind,
    categories: Collection<Category>,
    references: Arc<dyn CategoryReferences>,
    usage: RwLock<()>,
}

impl CategoryService {
    pub fn new(
        kind: CategoryKind,
        backend: Arc<dyn StorageBackend>,
        references: Arc<dyn CategoryReferences>,
    ) -> Self {
        Self {
            kind,
            categories: Collection::new(backend, kind.collection()),
            references,
            usage: RwLock::new(()),
        }
    }

    pub fn kind(&self) -> CategoryKind {
        self.kind
    }

    pub fn collection(&self) -> &Collection<Category> {
        &self.categories
    }

    pub async fn list(&self) -> Result<Vec<Category>> {
        Ok(self.categories.all().await?)
    }

    pub async fn get(&self, id: &str) -> Result<Category> {
        self.list()
            .await?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| self.not_found(id))
    }

    /// Reject references to categories that do not exist
    async fn ensure_exists(&self, id: &str) -> Result<()> {
        if self.list().await?.iter().any(|c| c.id == id) {
            return Ok(());
        }
        Err(AppError::BadRequest(format!(
            "Unknown {} category '{}'",
            self.kind.path(),
            id
        )))
    }

    /// Check `id` (when given) and keep deletions out until the guard drops
    pub async fn lock_reference(&self, id: Option<&str>) -> Result<RwLockReadGuard<'_, ()>> {
        let guard = self.usage.read().await;
        if let Some(id) = id {
            self.ensure_exists(id).await?;
        }
        Ok(guard)
    }

    pub async fn create(&self, dto: CreateCategoryDto) -> Result<Category> {
        let category = self
            .categories
            .mutate(|categories| {
                let id = match dto.id {
                    Some(id) if categories.iter().any(|c| c.id == id) => {
                        return Err(AppError::Conflict(format!(
                            "Category '{}' already exists",
                            id
                        )));
                    }
                    Some(id) => id,
                    None => generate_category_id(categories),
                };

                let now = Utc::now();
                let category = Category {
                    id,
                    name: dto.name.trim().to_string(),
                    color: dto
                        .color
                        .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string()),
                    created_at: Some(now),
                    updated_at: Some(now),
                };
                categories.push(category.clone());
                Ok(category)
            })
            .await?;

        tracing::info!(
            "Created {} category '{}'",
            self.kind.path(),
            category.id
        );
        Ok(category)
    }

    pub async fn update(&self, id: &str, dto: UpdateCategoryDto) -> Result<Category> {
        self.categories
            .mutate(|categories| {
                let category = categories
                    .iter_mut()
                    .find(|c| c.id == id)
                    .ok_or_else(|| self.not_found(id))?;

                if let Some(name) = dto.name {
                    category.name = name.trim().to_string();
                }
                if let Some(color) = dto.color {
                    category.color = color;
                }
                category.updated_at = Some(Utc::now());
                Ok(category.clone())
            })
            .await
    }

    /// Remove a category; refused while any active record still uses it
    pub async fn delete(&self, id: &str) -> Result<()> {
        let _exclusive = self.usage.write().await;
        if self.references.has_active_in_category(id).await? {
            return Err(AppError::Conflict(format!(
                "Category '{}' is still used by active {}",
                id,
                self.kind.path()
            )));
        }

        self.categories
            .mutate(|categories| {
                let before = categories.len();
                categories.retain(|c| c.id != id);
                if categories.len() == before {
                    return Err(self.not_found(id));
                }
                Ok(())
            })
            .await?;

        tracing::info!("Deleted {} category '{}'", self.kind.path(), id);
        Ok(())
    }

    fn not_found(&self, id: &str) -> AppError {
        AppError::NotFound(format!(
            "{} category '{}' not found",
            self.kind.path(),
            id
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::tips::models::{CookingTip, Difficulty};
    use crate::shared::constants::TIPS_COLLECTION;
    use crate::shared::test_helpers::memory_backend;

    async fn setup() -> (CategoryService, Arc<EntityStore<CookingTip>>) {
        let backend = memory_backend();
        let tips = Arc::new(EntityStore::new(Arc::clone(&backend), TIPS_COLLECTION));
        let service = CategoryService::new(CategoryKind::Tips, backend, tips.clone());
        service
            .collection()
            .replace(&[
                Category::seed("postres", "Postres", "#FF69B4"),
                Category::seed("bebidas", "Bebidas", "#4169E1"),
            ])
            .await
            .unwrap();
        (service, tips)
    }

    async fn add_tip(tips: &EntityStore<CookingTip>, category: &str) -> CookingTip {
        let category = category.to_string();
        tips.create(|_, id, now| {
            Ok(CookingTip {
                id,
                title: "Merengue firme".to_string(),
                content: "Bate las claras a temperatura ambiente.".to_string(),
                category,
                difficulty: Difficulty::Medium,
                time: "10 min".to_string(),
                tags: vec![],
                active: true,
                featured: false,
                order: id as i32,
                created_at: Some(now),
                updated_at: Some(now),
            })
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_delete_blocked_only_by_active_references() {
        let (service, tips) = setup().await;
        let tip = add_tip(&tips, "postres").await;

        let result = service.delete("postres").await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        tips.soft_delete(tip.id).await.unwrap();
        service.delete("postres").await.unwrap();
        assert!(matches!(
            service.get("postres").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_waits_for_pending_reference() {
        let (service, tips) = setup().await;
        let service = Arc::new(service);
        let (held_tx, held_rx) = tokio::sync::oneshot::channel();
        let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();

        let writer = {
            let service = Arc::clone(&service);
            let tips = Arc::clone(&tips);
            tokio::spawn(async move {
                let _usage = service.lock_reference(Some("bebidas")).await.unwrap();
                held_tx.send(()).unwrap();
                release_rx.await.unwrap();
                add_tip(&tips, "bebidas").await;
            })
        };
        held_rx.await.unwrap();

        let deleter = {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.delete("bebidas").await })
        };
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(!deleter.is_finished());

        release_tx.send(()).unwrap();
        writer.await.unwrap();
        let result = deleter.await.unwrap();
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert!(service.get("bebidas").await.is_ok());
    }

    #[tokio::test]
    async fn test_unreferenced_category_deletes() {
        let (service, tips) = setup().await;
        add_tip(&tips, "postres").await;
        service.delete("bebidas").await.unwrap();
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_generates_or_checks_ids() {
        let (service, _) = setup().await;

        let generated = service
            .create(CreateCategoryDto {
                id: None,
                name: "Carnes".to_string(),
                color: None,
            })
            .await
            .unwrap();
        assert_eq!(generated.id, "category-1");
        assert_eq!(generated.color, DEFAULT_CATEGORY_COLOR);

        let duplicate = service
            .create(CreateCategoryDto {
                id: Some("bebidas".to_string()),
                name: "Otra".to_string(),
                color: None,
            })
            .await;
        assert!(matches!(duplicate, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_ensure_exists() {
        let (service, _) = setup().await;
        service.ensure_exists("bebidas").await.unwrap();
        assert!(matches!(
            service.ensure_exists("mariscos").await,
            Err(AppError::BadRequest(_))
        ));
    }
}
