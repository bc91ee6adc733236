use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::messages::models::{MessagePriority, MessageStatus};
use crate::shared::types::{default_page, default_page_size, PaginationQuery};

/// Contact form submission
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMessageDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(max = 30))]
    pub phone: Option<String>,

    /// The public form has no subject field; a generic one is stored instead
    #[validate(length(max = 200))]
    pub subject: Option<String>,

    #[validate(length(min = 1, max = 5000))]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct MessageQueryParams {
    #[param(inline)]
    pub status: Option<MessageStatus>,

    #[param(inline)]
    pub priority: Option<MessagePriority>,

    /// Matches name, email, phone, subject, body and tags
    pub search: Option<String>,

    /// Include archived (soft-deleted) messages
    #[serde(default, alias = "include_archived")]
    pub include_archived: bool,

    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    #[serde(default = "default_page_size", alias = "page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
}

impl Default for MessageQueryParams {
    fn default() -> Self {
        Self {
            status: None,
            priority: None,
            search: None,
            include_archived: false,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl MessageQueryParams {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery::new(self.page, self.page_size)
    }
}

/// Back-office edit of a message; the sender's text is not editable
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateMessageDto {
    pub status: Option<MessageStatus>,

    pub priority: Option<MessagePriority>,

    #[validate(length(max = 30))]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangePriorityDto {
    pub priority: MessagePriority,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MessageTagsDto {
    #[validate(length(min = 1, max = 30))]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CleanupMessagesDto {
    /// Messages received more than this many days ago are deleted for good
    #[validate(range(min = 1, max = 3650))]
    pub days: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CleanupResultDto {
    pub deleted: usize,
}
