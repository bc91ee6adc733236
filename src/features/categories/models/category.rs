use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::{
    GALLERY_CATEGORIES_COLLECTION, SERVICE_CATEGORIES_COLLECTION, TIP_CATEGORIES_COLLECTION,
};

/// Which catalog a category set belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Services,
    Tips,
    Gallery,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 3] = [
        CategoryKind::Services,
        CategoryKind::Tips,
        CategoryKind::Gallery,
    ];

    /// URL segment under `/api/database`
    pub fn path(&self) -> &'static str {
        match self {
            CategoryKind::Services => "services",
            CategoryKind::Tips => "tips",
            CategoryKind::Gallery => "gallery",
        }
    }

    /// Inverse of [`CategoryKind::path`]
    pub fn from_path(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.path() == segment)
    }

    pub fn collection(&self) -> &'static str {
        match self {
            CategoryKind::Services => SERVICE_CATEGORIES_COLLECTION,
            CategoryKind::Tips => TIP_CATEGORIES_COLLECTION,
            CategoryKind::Gallery => GALLERY_CATEGORIES_COLLECTION,
        }
    }
}

/// A named, colored grouping referenced by catalog records through `id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Category {
    /// Seed category without timestamps
    pub fn seed(id: &str, name: &str, color: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            created_at: None,
            updated_at: None,
        }
    }
}

/// First `category-N` id not already taken
pub fn generate_category_id(existing: &[Category]) -> String {
    (1..)
        .map(|n| format!("category-{}", n))
        .find(|candidate| existing.iter().all(|c| &c.id != candidate))
        .unwrap_or_else(|| "category".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_path() {
        assert_eq!(CategoryKind::from_path("tips"), Some(CategoryKind::Tips));
        assert_eq!(CategoryKind::from_path("gallery"), Some(CategoryKind::Gallery));
        assert_eq!(CategoryKind::from_path("messages"), None);
    }

    #[test]
    fn test_generated_id_skips_taken_numbers() {
        let existing = vec![
            Category::seed("category-1", "Uno", "#000000"),
            Category::seed("category-3", "Tres", "#000000"),
        ];
        assert_eq!(generate_category_id(&existing), "category-2");
        assert_eq!(generate_category_id(&[]), "category-1");
    }
}
