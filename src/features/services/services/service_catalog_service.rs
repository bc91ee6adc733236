use std::sync::Arc;

use crate::core::error::Result;
use crate::features::categories::CategoryService;
use crate::features::services::dtos::{CreateServiceDto, UpdateServiceDto};
use crate::features::services::models::Service;
use crate::shared::entity::EntityStore;
use crate::shared::filtering::{ListQuery, PublicListQuery};

const DEFAULT_ICON: &str = "bi-star-fill";

/// Next display position after the last record
fn next_order(services: &[Service]) -> i32 {
    services.iter().map(|s| s.order).max().unwrap_or(0) + 1
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Catering services shown on the site and managed from the back-office
pub struct ServiceCatalogService {
    store: Arc<EntityStore<Service>>,
    categories: Arc<CategoryService>,
}

impl ServiceCatalogService {
    pub fn new(store: Arc<EntityStore<Service>>, categories: Arc<CategoryService>) -> Self {
        Self { store, categories }
    }

    pub fn categories(&self) -> &Arc<CategoryService> {
        &self.categories
    }

    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<Service>, i64)> {
        self.store.list(query).await
    }

    pub async fn list_active(&self, query: &PublicListQuery) -> Result<Vec<Service>> {
        let services = self.store.matching(&query.to_list_query()).await?;
        Ok(services)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Service> {
        self.store.get_by_id(id).await
    }

    pub async fn create(&self, dto: CreateServiceDto) -> Result<Service> {
        let _usage = self.categories.lock_reference(Some(&dto.category)).await?;

        let service = self
            .store
            .create(|services, id, now| {
                Ok(Service {
                    id,
                    title: dto.title.trim().to_string(),
                    description: dto.description.trim().to_string(),
                    icon: non_empty(dto.icon).unwrap_or_else(|| DEFAULT_ICON.to_string()),
                    category: dto.category,
                    badge: non_empty(dto.badge),
                    order: dto.order.unwrap_or_else(|| next_order(services)),
                    active: true,
                    featured: dto.featured,
                    created_at: Some(now),
                    updated_at: Some(now),
                })
            })
            .await?;

        tracing::info!("Created service {} '{}'", service.id, service.title);
        Ok(service)
    }

    pub async fn update(&self, id: i64, dto: UpdateServiceDto) -> Result<Service> {
        let _usage = self
            .categories
            .lock_reference(dto.category.as_deref())
            .await?;

        self.store
            .update(id, |service, _| {
                if let Some(title) = dto.title {
                    service.title = title.trim().to_string();
                }
                if let Some(description) = dto.description {
                    service.description = description.trim().to_string();
                }
                if let Some(icon) = non_empty(dto.icon) {
                    service.icon = icon;
                }
                if let Some(category) = dto.category {
                    service.category = category;
                }
                if dto.badge.is_some() {
                    service.badge = non_empty(dto.badge);
                }
                if let Some(order) = dto.order {
                    service.order = order;
                }
                if let Some(featured) = dto.featured {
                    service.featured = featured;
                }
                if let Some(active) = dto.active {
                    service.active = active;
                }
                Ok(())
            })
            .await
    }

    pub async fn soft_delete(&self, id: i64) -> Result<Service> {
        let service = self.store.soft_delete(id).await?;
        tracing::info!("Deactivated service {}", id);
        Ok(service)
    }

    pub async fn restore(&self, id: i64) -> Result<Service> {
        self.store.restore(id).await
    }

    pub async fn reorder(&self, ids: &[i64]) -> Result<usize> {
        self.store.reorder(ids).await
    }

    pub async fn search(&self, text: &str) -> Result<Vec<Service>> {
        self.store.search(text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::features::categories::models::{Category, CategoryKind};
    use crate::shared::constants::SERVICES_COLLECTION;
    use crate::shared::filtering::StatusFilter;
    use crate::shared::test_helpers::memory_backend;

    async fn service() -> ServiceCatalogService {
        let backend = memory_backend();
        let store = Arc::new(EntityStore::new(Arc::clone(&backend), SERVICES_COLLECTION));
        let categories = Arc::new(CategoryService::new(
            CategoryKind::Services,
            backend,
            store.clone(),
        ));
        categories
            .collection()
            .replace(&[
                Category::seed("catering", "Catering", "#D46528"),
                Category::seed("eventos", "Eventos", "#185A48"),
            ])
            .await
            .unwrap();
        ServiceCatalogService::new(store, categories)
    }

    fn create_dto(title: &str, category: &str, featured: bool) -> CreateServiceDto {
        CreateServiceDto {
            title: title.to_string(),
            description: format!("{} para todo tipo de ocasión", title),
            icon: None,
            category: category.to_string(),
            badge: None,
            order: None,
            featured,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_order_and_defaults() {
        let service = service().await;
        let first = service
            .create(create_dto("Catering Empresarial", "catering", true))
            .await
            .unwrap();
        let second = service
            .create(create_dto("Bodas", "eventos", false))
            .await
            .unwrap();

        assert_eq!((first.id, first.order), (1, 1));
        assert_eq!((second.id, second.order), (2, 2));
        assert_eq!(first.icon, DEFAULT_ICON);
        assert!(first.active);
        assert!(first.created_at.is_some());
    }

    #[tokio::test]
    async fn test_unknown_category_is_rejected() {
        let service = service().await;
        let result = service.create(create_dto("Brunch", "desayunos", false)).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let created = service
            .create(create_dto("Brunch", "catering", false))
            .await
            .unwrap();
        let update = UpdateServiceDto {
            category: Some("desayunos".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            service.update(created.id, update).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_update_is_partial_and_badge_can_be_cleared() {
        let service = service().await;
        let mut dto = create_dto("Cenas", "catering", false);
        dto.badge = Some("Nuevo".to_string());
        let created = service.create(dto).await.unwrap();

        let updated = service
            .update(
                created.id,
                UpdateServiceDto {
                    title: Some("Cenas privadas".to_string()),
                    badge: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Cenas privadas");
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.badge, None);
    }

    #[tokio::test]
    async fn test_public_listing_hides_inactive_and_respects_featured() {
        let service = service().await;
        service
            .create(create_dto("Catering Empresarial", "catering", true))
            .await
            .unwrap();
        let hidden = service
            .create(create_dto("Eventos Especiales", "eventos", true))
            .await
            .unwrap();
        service
            .create(create_dto("Menús Personalizados", "catering", false))
            .await
            .unwrap();
        service.soft_delete(hidden.id).await.unwrap();

        let active = service
            .list_active(&PublicListQuery::default())
            .await
            .unwrap();
        assert_eq!(active.len(), 2);

        let featured = service
            .list_active(&PublicListQuery {
                featured: true,
                category: None,
            })
            .await
            .unwrap();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].title, "Catering Empresarial");

        let (inactive, total) = service
            .list(&ListQuery {
                status: StatusFilter::Inactive,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(inactive[0].id, hidden.id);
    }

    #[tokio::test]
    async fn test_public_listing_is_not_paginated() {
        let service = service().await;
        for n in 1..=150 {
            service
                .create(create_dto(&format!("Servicio {}", n), "catering", false))
                .await
                .unwrap();
        }

        let active = service
            .list_active(&PublicListQuery::default())
            .await
            .unwrap();
        assert_eq!(active.len(), 150);
        assert_eq!(active.last().unwrap().title, "Servicio 150");
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let service = service().await;
        service
            .create(create_dto("Catering Empresarial", "catering", false))
            .await
            .unwrap();
        service
            .create(create_dto("Bodas", "eventos", false))
            .await
            .unwrap();

        let found = service.search("EMPRESA").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Catering Empresarial");
    }
}
