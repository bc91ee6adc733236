use serde::Serialize;
use utoipa::ToSchema;

use crate::features::messages::models::Message;

/// What the public contact form gets back; the stored message stays private
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactReceiptDto {
    pub id: i64,
}

impl From<&Message> for ContactReceiptDto {
    fn from(message: &Message) -> Self {
        Self { id: message.id }
    }
}
