use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::entity::Entity;
use crate::shared::filtering::text_matches;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    /// Alternative text for the `<img>` tag
    #[serde(default)]
    pub alt: String,
    /// Original upload name, kept for reference
    #[serde(default)]
    pub filename: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "active_by_default")]
    pub active: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn active_by_default() -> bool {
    true
}

/// Last path segment of an image URL, without query string
pub fn filename_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or_default()
        .to_string()
}

impl Entity for GalleryImage {
    const LABEL: &'static str = "Gallery image";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }

    fn matches(&self, term: &str) -> bool {
        text_matches(
            term,
            &[
                self.title.as_str(),
                self.description.as_str(),
                self.alt.as_str(),
                self.category.as_str(),
            ],
            &self.tags,
        )
    }

    fn is_featured(&self) -> bool {
        self.featured
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn set_order(&mut self, order: i32) {
        self.order = order;
    }

    fn ordering(a: &Self, b: &Self) -> Ordering {
        a.order.cmp(&b.order).then(a.id.cmp(&b.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_from_url() {
        assert_eq!(
            filename_from_url("https://images.unsplash.com/photo-1546069901?w=800"),
            "photo-1546069901"
        );
        assert_eq!(filename_from_url("/img/gallery/postre.jpg"), "postre.jpg");
        assert_eq!(filename_from_url("/img/gallery/"), "gallery");
        assert_eq!(filename_from_url(""), "");
    }

    #[test]
    fn test_search_covers_alt_text() {
        let image: GalleryImage = serde_json::from_value(serde_json::json!({
            "id": 3,
            "title": "Postre Artesanal",
            "url": "https://example.com/postre.jpg",
            "alt": "Tarta de maracuyá casera",
            "category": "postres"
        }))
        .unwrap();

        assert!(image.matches("maracuyá"));
        assert!(!image.matches("evento"));
        assert!(image.active);
    }
}
