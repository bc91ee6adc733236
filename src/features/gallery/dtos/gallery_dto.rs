use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateImageDto {
    #[validate(length(min = 1, max = 120))]
    pub title: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(url(message = "url must be an absolute URL"), length(max = 2048))]
    pub url: String,

    /// Defaults to the title
    #[validate(length(max = 250))]
    pub alt: Option<String>,

    /// Defaults to the last segment of `url`
    #[validate(length(max = 255))]
    pub filename: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub category: String,

    #[serde(default)]
    #[validate(length(max = 20))]
    pub tags: Vec<String>,

    pub order: Option<i32>,

    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateImageDto {
    #[validate(length(min = 1, max = 120))]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(url(message = "url must be an absolute URL"), length(max = 2048))]
    pub url: Option<String>,

    #[validate(length(max = 250))]
    pub alt: Option<String>,

    #[validate(length(max = 255))]
    pub filename: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub category: Option<String>,

    #[validate(length(max = 20))]
    pub tags: Option<Vec<String>>,

    pub order: Option<i32>,

    pub featured: Option<bool>,

    pub active: Option<bool>,
}
