//! List filtering shared by the catalog features (services, tips, gallery).
//!
//! Filters are AND-combined: status, then category, then free-text search.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::shared::types::{default_page, default_page_size, PaginationQuery};

/// Which records a list request wants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
    Featured,
}

impl StatusFilter {
    /// `featured` only counts for active records
    pub fn accepts(&self, active: bool, featured: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => active,
            StatusFilter::Inactive => !active,
            StatusFilter::Featured => active && featured,
        }
    }
}

/// Query params for listing catalog records
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// all | active | inactive | featured (default: all)
    #[serde(default)]
    #[param(inline)]
    pub status: StatusFilter,

    /// Category id to filter by
    pub category: Option<String>,

    /// Case-insensitive search over text fields and tags
    pub search: Option<String>,

    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Items per page (max 100)
    #[serde(default = "default_page_size", alias = "page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            status: StatusFilter::All,
            category: None,
            search: None,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl ListQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery::new(self.page, self.page_size)
    }

    /// Lowercased search term, ignoring blank input
    pub fn search_term(&self) -> Option<String> {
        normalize_term(self.search.as_deref())
    }

    /// Blank category filters are treated as absent
    pub fn category_filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Query params for the public, unauthenticated listings
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PublicListQuery {
    /// Only featured records
    #[serde(default)]
    pub featured: bool,

    /// Category id to filter by
    pub category: Option<String>,
}

impl PublicListQuery {
    /// Active (or featured) records of an optional category; callers do not paginate
    pub fn to_list_query(&self) -> ListQuery {
        ListQuery {
            status: if self.featured {
                StatusFilter::Featured
            } else {
                StatusFilter::Active
            },
            category: self.category.clone(),
            ..Default::default()
        }
    }
}

/// Free-text search across every record, active or not
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive text to look for
    pub q: String,
}

pub fn normalize_term(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

/// Trim and lowercase tags, dropping blanks and duplicates while keeping order
pub fn normalize_tags(tags: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !normalized.contains(&tag) {
            normalized.push(tag);
        }
    }
    normalized
}

/// True when `term` (already lowercased) occurs in any field or tag
pub fn text_matches(term: &str, fields: &[&str], tags: &[String]) -> bool {
    fields.iter().any(|f| f.to_lowercase().contains(term))
        || tags.iter().any(|t| t.to_lowercase().contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter_accepts() {
        assert!(StatusFilter::All.accepts(false, false));
        assert!(StatusFilter::Active.accepts(true, false));
        assert!(!StatusFilter::Active.accepts(false, true));
        assert!(StatusFilter::Inactive.accepts(false, true));
        assert!(StatusFilter::Featured.accepts(true, true));
        assert!(!StatusFilter::Featured.accepts(false, true));
    }

    #[test]
    fn test_text_matches_is_case_insensitive() {
        let tags = vec!["Hierbas".to_string()];
        assert!(text_matches("conserv", &["Conservación de Hierbas"], &[]));
        assert!(text_matches("hierbas", &["Otro"], &tags));
        assert!(!text_matches("cebolla", &["Huevos"], &tags));
    }

    #[test]
    fn test_list_query_reads_camel_case_page_size() {
        let query: ListQuery = serde_json::from_value(serde_json::json!({
            "pageSize": 5,
            "page": 2
        }))
        .unwrap();
        assert_eq!(query.page_size, 5);
        assert_eq!(query.pagination().offset(), 5);
    }

    #[test]
    fn test_public_query_never_shows_inactive() {
        let query = PublicListQuery::default().to_list_query();
        assert_eq!(query.status, StatusFilter::Active);

        let featured = PublicListQuery {
            featured: true,
            category: None,
        };
        assert_eq!(featured.to_list_query().status, StatusFilter::Featured);
    }

    #[test]
    fn test_normalize_tags() {
        let tags = vec![
            " Boda ".to_string(),
            "boda".to_string(),
            "".to_string(),
            "Evento".to_string(),
        ];
        assert_eq!(normalize_tags(tags), vec!["boda", "evento"]);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let query = ListQuery {
            search: Some("   ".to_string()),
            category: Some("".to_string()),
            ..Default::default()
        };
        assert!(query.search_term().is_none());
        assert!(query.category_filter().is_none());
    }
}
