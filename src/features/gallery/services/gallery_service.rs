use std::sync::Arc;

use crate::core::error::Result;
use crate::features::categories::CategoryService;
use crate::features::gallery::dtos::{CreateImageDto, UpdateImageDto};
use crate::features::gallery::models::{filename_from_url, GalleryImage};
use crate::shared::entity::EntityStore;
use crate::shared::filtering::{normalize_tags, ListQuery, PublicListQuery};

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Photo gallery shown on the site
pub struct GalleryService {
    store: Arc<EntityStore<GalleryImage>>,
    categories: Arc<CategoryService>,
}

impl GalleryService {
    pub fn new(store: Arc<EntityStore<GalleryImage>>, categories: Arc<CategoryService>) -> Self {
        Self { store, categories }
    }

    pub fn categories(&self) -> &Arc<CategoryService> {
        &self.categories
    }

    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<GalleryImage>, i64)> {
        self.store.list(query).await
    }

    pub async fn list_active(&self, query: &PublicListQuery) -> Result<Vec<GalleryImage>> {
        let images = self.store.matching(&query.to_list_query()).await?;
        Ok(images)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<GalleryImage> {
        self.store.get_by_id(id).await
    }

    pub async fn create(&self, dto: CreateImageDto) -> Result<GalleryImage> {
        let _usage = self.categories.lock_reference(Some(&dto.category)).await?;

        let image = self
            .store
            .create(|images, id, now| {
                let title = dto.title.trim().to_string();
                let url = dto.url.trim().to_string();
                let order = dto
                    .order
                    .unwrap_or_else(|| images.iter().map(|i| i.order).max().unwrap_or(0) + 1);

                Ok(GalleryImage {
                    id,
                    alt: trimmed(dto.alt).unwrap_or_else(|| title.clone()),
                    filename: trimmed(dto.filename).unwrap_or_else(|| filename_from_url(&url)),
                    title,
                    description: trimmed(dto.description).unwrap_or_default(),
                    url,
                    category: dto.category,
                    tags: normalize_tags(dto.tags),
                    active: true,
                    featured: dto.featured,
                    order,
                    created_at: Some(now),
                    updated_at: Some(now),
                })
            })
            .await?;

        tracing::info!("Added gallery image {} '{}'", image.id, image.title);
        Ok(image)
    }

    pub async fn update(&self, id: i64, dto: UpdateImageDto) -> Result<GalleryImage> {
        let _usage = self
            .categories
            .lock_reference(dto.category.as_deref())
            .await?;

        self.store
            .update(id, |image, _| {
                if let Some(title) = dto.title {
                    image.title = title.trim().to_string();
                }
                if let Some(description) = dto.description {
                    image.description = description.trim().to_string();
                }
                if let Some(url) = trimmed(dto.url) {
                    image.url = url;
                }
                if let Some(alt) = dto.alt {
                    image.alt = alt.trim().to_string();
                }
                if let Some(filename) = dto.filename {
                    image.filename = filename.trim().to_string();
                }
                if let Some(category) = dto.category {
                    image.category = category;
                }
                if let Some(tags) = dto.tags {
                    image.tags = normalize_tags(tags);
                }
                if let Some(order) = dto.order {
                    image.order = order;
                }
                if let Some(featured) = dto.featured {
                    image.featured = featured;
                }
                if let Some(active) = dto.active {
                    image.active = active;
                }
                Ok(())
            })
            .await
    }

    pub async fn soft_delete(&self, id: i64) -> Result<GalleryImage> {
        let image = self.store.soft_delete(id).await?;
        tracing::info!("Hid gallery image {}", id);
        Ok(image)
    }

    pub async fn restore(&self, id: i64) -> Result<GalleryImage> {
        self.store.restore(id).await
    }

    pub async fn reorder(&self, ids: &[i64]) -> Result<usize> {
        self.store.reorder(ids).await
    }

    pub async fn search(&self, text: &str) -> Result<Vec<GalleryImage>> {
        self.store.search(text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::features::categories::dtos::CreateCategoryDto;
    use crate::features::categories::models::CategoryKind;
    use crate::shared::constants::GALLERY_COLLECTION;
    use crate::shared::test_helpers::memory_backend;

    async fn setup() -> (GalleryService, Arc<CategoryService>) {
        let backend = memory_backend();
        let store = Arc::new(EntityStore::new(Arc::clone(&backend), GALLERY_COLLECTION));
        let categories = Arc::new(CategoryService::new(
            CategoryKind::Gallery,
            backend,
            store.clone(),
        ));
        categories
            .create(CreateCategoryDto {
                id: Some("postres".to_string()),
                name: "Postres".to_string(),
                color: None,
            })
            .await
            .unwrap();
        (GalleryService::new(store, Arc::clone(&categories)), categories)
    }

    fn create_dto(title: &str) -> CreateImageDto {
        CreateImageDto {
            title: title.to_string(),
            description: None,
            url: "https://example.com/img/postre-artesanal.jpg?w=800".to_string(),
            alt: None,
            filename: None,
            category: "postres".to_string(),
            tags: vec!["Postre".to_string()],
            order: None,
            featured: true,
        }
    }

    #[tokio::test]
    async fn test_create_fills_alt_and_filename() {
        let (service, _) = setup().await;
        let image = service.create(create_dto("Postre Artesanal")).await.unwrap();

        assert_eq!(image.alt, "Postre Artesanal");
        assert_eq!(image.filename, "postre-artesanal.jpg");
        assert_eq!(image.tags, vec!["postre"]);
        assert_eq!(image.order, 1);
    }

    #[tokio::test]
    async fn test_category_in_use_cannot_be_deleted_until_image_hidden() {
        let (service, categories) = setup().await;
        let image = service.create(create_dto("Tres Leches")).await.unwrap();

        assert!(matches!(
            categories.delete("postres").await,
            Err(AppError::Conflict(_))
        ));

        service.soft_delete(image.id).await.unwrap();
        categories.delete("postres").await.unwrap();

        // the hidden image keeps its category reference
        let hidden = service.get_by_id(image.id).await.unwrap();
        assert_eq!(hidden.category, "postres");
        assert!(!hidden.active);
    }

    #[tokio::test]
    async fn test_ids_keep_growing_after_soft_delete() {
        let (service, _) = setup().await;
        let first = service.create(create_dto("Uno")).await.unwrap();
        service.soft_delete(first.id).await.unwrap();
        let second = service.create(create_dto("Dos")).await.unwrap();
        assert_eq!(second.id, first.id + 1);
    }
}
