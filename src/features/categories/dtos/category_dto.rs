use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::validation::{HEX_COLOR_REGEX, SLUG_REGEX};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    /// Optional slug; generated as `category-N` when omitted
    #[validate(
        length(min = 1, max = 50),
        regex(path = *SLUG_REGEX, message = "id must be lowercase letters, digits and single hyphens")
    )]
    pub id: Option<String>,

    #[validate(length(min = 1, max = 80))]
    pub name: String,

    /// `#RRGGBB`, defaults to the brand orange
    #[validate(regex(path = *HEX_COLOR_REGEX, message = "color must look like #RRGGBB"))]
    pub color: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 80))]
    pub name: Option<String>,

    #[validate(regex(path = *HEX_COLOR_REGEX, message = "color must look like #RRGGBB"))]
    pub color: Option<String>,
}
