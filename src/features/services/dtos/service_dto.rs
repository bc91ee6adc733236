use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateServiceDto {
    #[validate(length(min = 1, max = 120))]
    pub title: String,

    #[validate(length(min = 1, max = 2000))]
    pub description: String,

    #[validate(length(max = 60))]
    pub icon: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub category: String,

    #[validate(length(max = 40))]
    pub badge: Option<String>,

    /// Display position; appended after the last service when omitted
    pub order: Option<i32>,

    #[serde(default)]
    pub featured: bool,
}

/// Partial update; absent fields keep their value, an empty `badge` clears it
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateServiceDto {
    #[validate(length(min = 1, max = 120))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 2000))]
    pub description: Option<String>,

    #[validate(length(max = 60))]
    pub icon: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub category: Option<String>,

    #[validate(length(max = 40))]
    pub badge: Option<String>,

    pub order: Option<i32>,

    pub featured: Option<bool>,

    pub active: Option<bool>,
}
