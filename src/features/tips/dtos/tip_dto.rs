use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::features::tips::models::Difficulty;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTipDto {
    #[validate(length(min = 1, max = 120))]
    pub title: String,

    #[validate(length(min = 1, max = 4000))]
    pub content: String,

    #[validate(length(min = 1, max = 50))]
    pub category: String,

    #[serde(default)]
    pub difficulty: Difficulty,

    #[validate(length(max = 40))]
    pub time: Option<String>,

    #[serde(default)]
    #[validate(length(max = 20))]
    pub tags: Vec<String>,

    pub order: Option<i32>,

    #[serde(default)]
    pub featured: bool,
}

/// Partial update; `tags` replaces the whole list when present
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTipDto {
    #[validate(length(min = 1, max = 120))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 4000))]
    pub content: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub category: Option<String>,

    pub difficulty: Option<Difficulty>,

    #[validate(length(max = 40))]
    pub time: Option<String>,

    #[validate(length(max = 20))]
    pub tags: Option<Vec<String>>,

    pub order: Option<i32>,

    pub featured: Option<bool>,

    pub active: Option<bool>,
}
