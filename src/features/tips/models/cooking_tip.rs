use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::entity::Entity;
use crate::shared::filtering::text_matches;

/// How demanding a tip is; Spanish labels from older data files are accepted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    #[serde(alias = "facil", alias = "fácil")]
    Easy,
    #[serde(alias = "media", alias = "medio")]
    Medium,
    #[serde(alias = "dificil", alias = "difícil")]
    Hard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CookingTip {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Free-form duration label, e.g. "15 min"
    #[serde(default)]
    pub time: String,
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

impl Entity for CookingTip {
    const LABEL: &'static str = "Cooking tip";

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
                self.content.as_str(),
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
    fn test_difficulty_accepts_spanish_labels() {
        let parsed: Vec<Difficulty> =
            serde_json::from_str(r#"["facil", "media", "medio", "dificil", "hard"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                Difficulty::Easy,
                Difficulty::Medium,
                Difficulty::Medium,
                Difficulty::Hard,
                Difficulty::Hard
            ]
        );
        assert_eq!(
            serde_json::to_string(&Difficulty::Medium).unwrap(),
            r#""medium""#
        );
    }

    #[test]
    fn test_legacy_tip_without_timestamps_loads() {
        let tip: CookingTip = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "Conservación de Hierbas",
            "content": "Envuelve los tallos en una toalla húmeda.",
            "category": "conservacion",
            "difficulty": "facil",
            "time": "5 min",
            "tags": ["hierbas"]
        }))
        .unwrap();

        assert!(tip.active);
        assert!(tip.created_at.is_none());
        assert!(tip.matches("hierbas"));
    }
}
