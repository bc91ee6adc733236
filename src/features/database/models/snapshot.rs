use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::categories::models::Category;
use crate::features::gallery::models::GalleryImage;
use crate::features::messages::models::Message;
use crate::features::services::models::Service;
use crate::features::tips::models::CookingTip;
use crate::features::users::models::User;
use crate::shared::entity::EntityCounts;

/// Full backup of every collection.
///
/// On import, each collection present in the payload replaces the stored
/// one; absent collections are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<Service>>,
    /// Service categories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<Vec<CookingTip>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip_categories: Option<Vec<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<GalleryImage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery_categories: Option<Vec<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<User>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<Message>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryTotals {
    pub services: i64,
    pub tips: i64,
    pub gallery: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DatabaseStats {
    /// Active storage backend: memory, json or sqlite
    pub backend: String,
    pub services: EntityCounts,
    pub tips: EntityCounts,
    pub gallery: EntityCounts,
    pub users: EntityCounts,
    pub messages: EntityCounts,
    pub categories: CategoryTotals,
}
