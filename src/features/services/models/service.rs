use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::entity::Entity;
use crate::shared::filtering::text_matches;

/// A catering service offered on the site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Bootstrap icon class, e.g. `bi-cup-hot-fill`
    #[serde(default)]
    pub icon: String,
    pub category: String,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "active_by_default")]
    pub active: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn active_by_default() -> bool {
    true
}

impl Entity for Service {
    const LABEL: &'static str = "Service";

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
        let badge = self.badge.as_deref().unwrap_or_default();
        text_matches(
            term,
            &[
                self.title.as_str(),
                self.description.as_str(),
                self.category.as_str(),
                badge,
            ],
            &[],
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
