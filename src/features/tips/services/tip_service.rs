use std::sync::Arc;

use crate::core::error::Result;
use crate::features::categories::CategoryService;
use crate::features::tips::dtos::{CreateTipDto, UpdateTipDto};
use crate::features::tips::models::CookingTip;
use crate::shared::entity::EntityStore;
use crate::shared::filtering::{normalize_tags, ListQuery, PublicListQuery};

pub struct TipService {
    store: Arc<EntityStore<CookingTip>>,
    categories: Arc<CategoryService>,
}

impl TipService {
    pub fn new(store: Arc<EntityStore<CookingTip>>, categories: Arc<CategoryService>) -> Self {
        Self { store, categories }
    }

    pub fn categories(&self) -> &Arc<CategoryService> {
        &self.categories
    }

    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<CookingTip>, i64)> {
        self.store.list(query).await
    }

    pub async fn list_active(&self, query: &PublicListQuery) -> Result<Vec<CookingTip>> {
        let tips = self.store.matching(&query.to_list_query()).await?;
        Ok(tips)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<CookingTip> {
        self.store.get_by_id(id).await
    }

    pub async fn create(&self, dto: CreateTipDto) -> Result<CookingTip> {
        let _usage = self.categories.lock_reference(Some(&dto.category)).await?;

        let tip = self
            .store
            .create(|tips, id, now| {
                let order = dto
                    .order
                    .unwrap_or_else(|| tips.iter().map(|t| t.order).max().unwrap_or(0) + 1);

                Ok(CookingTip {
                    id,
                    title: dto.title.trim().to_string(),
                    content: dto.content.trim().to_string(),
                    category: dto.category,
                    difficulty: dto.difficulty,
                    time: dto.time.map(|t| t.trim().to_string()).unwrap_or_default(),
                    tags: normalize_tags(dto.tags),
                    active: true,
                    featured: dto.featured,
                    order,
                    created_at: Some(now),
                    updated_at: Some(now),
                })
            })
            .await?;

        tracing::info!("Created cooking tip {} '{}'", tip.id, tip.title);
        Ok(tip)
    }

    pub async fn update(&self, id: i64, dto: UpdateTipDto) -> Result<CookingTip> {
        let _usage = self
            .categories
            .lock_reference(dto.category.as_deref())
            .await?;

        self.store
            .update(id, |tip, _| {
                if let Some(title) = dto.title {
                    tip.title = title.trim().to_string();
                }
                if let Some(content) = dto.content {
                    tip.content = content.trim().to_string();
                }
                if let Some(category) = dto.category {
                    tip.category = category;
                }
                if let Some(difficulty) = dto.difficulty {
                    tip.difficulty = difficulty;
                }
                if let Some(time) = dto.time {
                    tip.time = time.trim().to_string();
                }
                if let Some(tags) = dto.tags {
                    tip.tags = normalize_tags(tags);
                }
                if let Some(order) = dto.order {
                    tip.order = order;
                }
                if let Some(featured) = dto.featured {
                    tip.featured = featured;
                }
                if let Some(active) = dto.active {
                    tip.active = active;
                }
                Ok(())
            })
            .await
    }

    pub async fn soft_delete(&self, id: i64) -> Result<CookingTip> {
        let tip = self.store.soft_delete(id).await?;
        tracing::info!("Deactivated cooking tip {}", id);
        Ok(tip)
    }

    pub async fn restore(&self, id: i64) -> Result<CookingTip> {
        self.store.restore(id).await
    }

    pub async fn reorder(&self, ids: &[i64]) -> Result<usize> {
        self.store.reorder(ids).await
    }

    pub async fn search(&self, text: &str) -> Result<Vec<CookingTip>> {
        self.store.search(text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::models::{Category, CategoryKind};
    use crate::features::tips::models::Difficulty;
    use crate::shared::constants::TIPS_COLLECTION;
    use crate::shared::test_helpers::memory_backend;

    async fn service() -> TipService {
        let backend = memory_backend();
        let store = Arc::new(EntityStore::new(Arc::clone(&backend), TIPS_COLLECTION));
        let categories = Arc::new(CategoryService::new(
            CategoryKind::Tips,
            backend,
            store.clone(),
        ));
        categories
            .collection()
            .replace(&[
                Category::seed("tecnicas", "Técnicas", "#185A48"),
                Category::seed("huevos", "Huevos", "#8B4513"),
            ])
            .await
            .unwrap();
        TipService::new(store, categories)
    }

    fn create_dto(title: &str, category: &str, tags: &[&str]) -> CreateTipDto {
        CreateTipDto {
            title: title.to_string(),
            content: format!("{}: paso a paso", title),
            category: category.to_string(),
            difficulty: Difficulty::Easy,
            time: Some("10 min".to_string()),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            order: None,
            featured: false,
        }
    }

    #[tokio::test]
    async fn test_tags_are_normalized_and_searchable() {
        let service = service().await;
        let tip = service
            .create(create_dto(
                "Cortar Cebolla Sin Llorar",
                "tecnicas",
                &["Cebolla", "truco", "cebolla "],
            ))
            .await
            .unwrap();
        assert_eq!(tip.tags, vec!["cebolla", "truco"]);

        service
            .create(create_dto("Huevos Perfectos", "huevos", &["coccion"]))
            .await
            .unwrap();

        let query = ListQuery {
            search: Some("TRUCO".to_string()),
            ..Default::default()
        };
        let (found, total) = service.list(&query).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(found[0].id, tip.id);
    }

    #[tokio::test]
    async fn test_category_filter() {
        let service = service().await;
        service
            .create(create_dto("Cortar Cebolla", "tecnicas", &[]))
            .await
            .unwrap();
        service
            .create(create_dto("Huevos Perfectos", "huevos", &[]))
            .await
            .unwrap();

        let active = service
            .list_active(&PublicListQuery {
                featured: false,
                category: Some("huevos".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "Huevos Perfectos");
    }

    #[tokio::test]
    async fn test_update_replaces_tags_and_difficulty() {
        let service = service().await;
        let tip = service
            .create(create_dto("Merengue", "tecnicas", &["postre"]))
            .await
            .unwrap();

        let updated = service
            .update(
                tip.id,
                UpdateTipDto {
                    difficulty: Some(Difficulty::Hard),
                    tags: Some(vec!["Claras".to_string()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.difficulty, Difficulty::Hard);
        assert_eq!(updated.tags, vec!["claras"]);
        assert_eq!(updated.title, "Merengue");
        assert!(updated.updated_at >= tip.updated_at);
    }
}
