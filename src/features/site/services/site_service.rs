use std::sync::Arc;

use chrono::{Datelike, Utc};
use minijinja::context;
use serde::Serialize;

use crate::core::error::Result;
use crate::features::categories::models::{Category, CategoryKind};
use crate::features::gallery::models::GalleryImage;
use crate::features::gallery::GalleryService;
use crate::features::messages::dtos::CreateMessageDto;
use crate::features::messages::models::Message;
use crate::features::messages::MessageService;
use crate::features::services::models::Service;
use crate::features::services::ServiceCatalogService;
use crate::features::tips::models::CookingTip;
use crate::features::tips::TipService;
use crate::shared::constants::{DEFAULT_CATEGORY_COLOR, SITE_NAME};
use crate::shared::entity::Entity;
use crate::shared::filtering::PublicListQuery;
use crate::shared::templates::{
    TemplateEngine, GALLERY_FRAGMENT, INDEX_TEMPLATE, SERVICES_FRAGMENT, TIPS_FRAGMENT,
};

/// Category as shown next to a record; unknown ids fall back to the raw id
#[derive(Debug, Clone, Serialize)]
pub struct CategoryLabel {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// A record paired with its resolved category
#[derive(Debug, Clone, Serialize)]
pub struct Card<T> {
    pub item: T,
    pub category: CategoryLabel,
}

fn cards<T: Entity>(items: Vec<T>, categories: &[Category]) -> Vec<Card<T>> {
    items
        .into_iter()
        .map(|item| {
            let id = item.category().unwrap_or_default().to_string();
            let category = match categories.iter().find(|c| c.id == id) {
                Some(c) => CategoryLabel {
                    id,
                    name: c.name.clone(),
                    color: c.color.clone(),
                },
                None => CategoryLabel {
                    name: id.clone(),
                    id,
                    color: DEFAULT_CATEGORY_COLOR.to_string(),
                },
            };
            Card { item, category }
        })
        .collect()
}

/// Renders the public site from the live catalogs
pub struct SiteService {
    templates: Arc<TemplateEngine>,
    services: Arc<ServiceCatalogService>,
    tips: Arc<TipService>,
    gallery: Arc<GalleryService>,
    messages: Arc<MessageService>,
}

impl SiteService {
    pub fn new(
        templates: Arc<TemplateEngine>,
        services: Arc<ServiceCatalogService>,
        tips: Arc<TipService>,
        gallery: Arc<GalleryService>,
        messages: Arc<MessageService>,
    ) -> Self {
        Self {
            templates,
            services,
            tips,
            gallery,
            messages,
        }
    }

    /// Full landing page with every active record
    pub async fn render_page(&self) -> Result<String> {
        let all = PublicListQuery::default();
        let services = self.service_cards(&all).await?;
        let tips = self.tip_cards(&all).await?;
        let images = self.gallery_cards(&all).await?;
        let tip_categories = self.tips.categories().list().await?;

        let html = self.templates.render(
            INDEX_TEMPLATE,
            context! {
                site_name => SITE_NAME,
                year => Utc::now().year(),
                services,
                tips,
                images,
                tip_categories,
            },
        )?;
        Ok(html)
    }

    /// One catalog's cards, optionally narrowed to a category or to featured records
    pub async fn render_fragment(
        &self,
        kind: CategoryKind,
        query: &PublicListQuery,
    ) -> Result<String> {
        let html = match kind {
            CategoryKind::Services => {
                let services = self.service_cards(query).await?;
                self.templates
                    .render(SERVICES_FRAGMENT, context! { services })?
            }
            CategoryKind::Tips => {
                let tips = self.tip_cards(query).await?;
                self.templates.render(TIPS_FRAGMENT, context! { tips })?
            }
            CategoryKind::Gallery => {
                let images = self.gallery_cards(query).await?;
                self.templates.render(GALLERY_FRAGMENT, context! { images })?
            }
        };
        Ok(html)
    }

    /// Contact form submission from the public page
    pub async fn submit_contact(&self, dto: CreateMessageDto) -> Result<Message> {
        self.messages.create(dto).await
    }

    async fn service_cards(&self, query: &PublicListQuery) -> Result<Vec<Card<Service>>> {
        let categories = self.services.categories().list().await?;
        Ok(cards(self.services.list_active(query).await?, &categories))
    }

    async fn tip_cards(&self, query: &PublicListQuery) -> Result<Vec<Card<CookingTip>>> {
        let categories = self.tips.categories().list().await?;
        Ok(cards(self.tips.list_active(query).await?, &categories))
    }

    async fn gallery_cards(&self, query: &PublicListQuery) -> Result<Vec<Card<GalleryImage>>> {
        let categories = self.gallery.categories().list().await?;
        Ok(cards(self.gallery.list_active(query).await?, &categories))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::database::DataStores;
    use crate::features::gallery::dtos::CreateImageDto;
    use crate::features::services::dtos::CreateServiceDto;
    use crate::features::tips::dtos::CreateTipDto;
    use crate::features::tips::models::Difficulty;
    use crate::shared::test_helpers::memory_backend;

    async fn site() -> SiteService {
        let stores = DataStores::new(memory_backend());
        for category in stores.categories() {
            category
                .collection()
                .replace(&[
                    Category::seed("eventos", "Eventos", "#185A48"),
                    Category::seed("tecnicas", "Técnicas", "#2E7D32"),
                ])
                .await
                .unwrap();
        }

        SiteService::new(
            Arc::new(TemplateEngine::builtin()),
            Arc::new(ServiceCatalogService::new(
                stores.services.clone(),
                stores.service_categories.clone(),
            )),
            Arc::new(TipService::new(
                stores.tips.clone(),
                stores.tip_categories.clone(),
            )),
            Arc::new(GalleryService::new(
                stores.gallery.clone(),
                stores.gallery_categories.clone(),
            )),
            Arc::new(MessageService::new(stores.messages.clone())),
        )
    }

    #[tokio::test]
    async fn test_page_renders_cards_with_escaping() {
        let site = site().await;
        site.services
            .create(CreateServiceDto {
                title: "Bodas & Quinceañeras".to_string(),
                description: "Banquetes <completos>".to_string(),
                icon: Some("bi-heart".to_string()),
                category: "eventos".to_string(),
                badge: Some("Popular".to_string()),
                order: None,
                featured: false,
            })
            .await
            .unwrap();

        let html = site.render_page().await.unwrap();
        assert!(html.contains("Bodas &amp; Quinceañeras"));
        assert!(html.contains("Banquetes &lt;completos&gt;"));
        assert!(html.contains(r#"<div class="service-badge">Popular</div>"#));
        assert!(html.contains(SITE_NAME));
    }

    #[tokio::test]
    async fn test_tip_fragment_uses_category_color_and_filter() {
        let site = site().await;
        for (title, category) in [("Caldo claro", "tecnicas"), ("Mesa de postres", "eventos")] {
            site.tips
                .create(CreateTipDto {
                    title: title.to_string(),
                    content: "Contenido".to_string(),
                    category: category.to_string(),
                    difficulty: Difficulty::Easy,
                    time: Some("20 min".to_string()),
                    tags: vec![],
                    order: None,
                    featured: false,
                })
                .await
                .unwrap();
        }

        let query = PublicListQuery {
            featured: false,
            category: Some("tecnicas".to_string()),
        };
        let html = site
            .render_fragment(CategoryKind::Tips, &query)
            .await
            .unwrap();
        assert!(html.contains("Caldo claro"));
        assert!(!html.contains("Mesa de postres"));
        assert!(html.contains("--tip-category-color: #2E7D32"));
        assert!(html.contains("Técnicas"));
        assert!(html.contains("Fácil"));
    }

    #[tokio::test]
    async fn test_gallery_fragment() {
        let site = site().await;
        let empty = site
            .render_fragment(CategoryKind::Gallery, &PublicListQuery::default())
            .await
            .unwrap();
        assert!(empty.contains("gallery-empty"));

        site.gallery
            .create(CreateImageDto {
                title: "Mesa buffet".to_string(),
                description: None,
                url: "/img/buffet.jpg".to_string(),
                alt: None,
                filename: None,
                category: "eventos".to_string(),
                tags: vec![],
                order: None,
                featured: true,
            })
            .await
            .unwrap();

        let featured = PublicListQuery {
            featured: true,
            category: None,
        };
        let html = site
            .render_fragment(CategoryKind::Gallery, &featured)
            .await
            .unwrap();
        assert!(html.contains(r#"<div class="gallery-item featured" data-category="eventos">"#));
        assert!(html.contains(r#"alt="Mesa buffet""#));
    }
}
