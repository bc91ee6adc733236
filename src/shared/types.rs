use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Standard pagination query parameters for list endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PaginationQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Number of items per page (default: 10, max: 100)
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
}

pub(crate) fn default_page() -> i64 {
    1
}

pub(crate) fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationQuery {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self { page, page_size }
    }

    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1).saturating_mul(self.limit())
    }

    /// Get clamped page_size (respects MAX_PAGE_SIZE)
    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Slice one page out of an already filtered and sorted list.
    ///
    /// Returns the page and the total number of items before paging.
    pub fn apply<T>(&self, items: Vec<T>) -> (Vec<T>, i64) {
        let total = items.len() as i64;
        let page = items
            .into_iter()
            .skip(usize::try_from(self.offset()).unwrap_or(usize::MAX))
            .take(self.limit() as usize)
            .collect();
        (page, total)
    }
}

// =============================================================================
// ORDERING
// =============================================================================

/// New display order: record ids from first to last
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReorderDto {
    #[validate(length(min = 1, max = 1000))]
    pub ids: Vec<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReorderResultDto {
    /// Number of ids that matched a record
    pub moved: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_and_limit_are_clamped() {
        let query = PaginationQuery::new(0, 1000);
        assert_eq!(query.offset(), 0);
        assert_eq!(query.limit(), MAX_PAGE_SIZE);

        let query = PaginationQuery::new(3, 10);
        assert_eq!(query.offset(), 20);
    }

    #[test]
    fn test_apply_returns_page_and_total() {
        let items: Vec<i32> = (1..=25).collect();

        let (page, total) = PaginationQuery::new(3, 10).apply(items.clone());
        assert_eq!(total, 25);
        assert_eq!(page, vec![21, 22, 23, 24, 25]);

        let (page, total) = PaginationQuery::new(4, 10).apply(items);
        assert_eq!(total, 25);
        assert!(page.is_empty());
    }

    #[test]
    fn test_huge_page_number_yields_empty_page() {
        let query = PaginationQuery::new(i64::MAX, 10);
        assert_eq!(query.offset(), i64::MAX);

        let (page, total) = query.apply((1..=5).collect::<Vec<i32>>());
        assert_eq!(total, 5);
        assert!(page.is_empty());
    }
}
