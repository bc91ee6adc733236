use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::{RequireAdmin, RequireEditor, RequireViewer};
use crate::features::messages::dtos::{
    ChangePriorityDto, CleanupMessagesDto, CleanupResultDto, MessageQueryParams, MessageTagsDto,
    UpdateMessageDto,
};
use crate::features::messages::models::{Message, MessageStats};
use crate::features::messages::services::MessageService;
use crate::shared::types::{ApiResponse, Meta};

/// List contact messages, newest first
#[utoipa::path(
    get,
    path = "/api/database/messages",
    params(MessageQueryParams),
    responses(
        (status = 200, description = "Messages retrieved successfully", body = ApiResponse<Vec<Message>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "messages",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_messages(
    RequireViewer(_user): RequireViewer,
    State(service): State<Arc<MessageService>>,
    AppQuery(query): AppQuery<MessageQueryParams>,
) -> Result<Json<ApiResponse<Vec<Message>>>> {
    let (messages, total) = service.list(&query).await?;
    Ok(Json(ApiResponse::success(
        Some(messages),
        None,
        Some(Meta { total }),
    )))
}

/// Inbox counters by status, priority and age
#[utoipa::path(
    get,
    path = "/api/database/messages/stats",
    responses(
        (status = 200, description = "Message statistics", body = ApiResponse<MessageStats>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "messages",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn message_stats(
    RequireViewer(_user): RequireViewer,
    State(service): State<Arc<MessageService>>,
) -> Result<Json<ApiResponse<MessageStats>>> {
    let stats = service.stats().await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// Permanently delete old messages (admin only)
#[utoipa::path(
    post,
    path = "/api/database/messages/cleanup",
    request_body = CleanupMessagesDto,
    responses(
        (status = 200, description = "Old messages deleted", body = ApiResponse<CleanupResultDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "messages",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn cleanup_messages(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<MessageService>>,
    AppJson(dto): AppJson<CleanupMessagesDto>,
) -> Result<Json<ApiResponse<CleanupResultDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let deleted = service.cleanup(dto.days).await?;
    tracing::info!(
        "{} cleaned up {} messages older than {} days",
        admin.username,
        deleted,
        dto.days
    );
    Ok(Json(ApiResponse::success(
        Some(CleanupResultDto { deleted }),
        None,
        None,
    )))
}

#[utoipa::path(
    get,
    path = "/api/database/messages/{id}",
    params(
        ("id" = i64, Path, description = "Message ID")
    ),
    responses(
        (status = 200, description = "Message retrieved successfully", body = ApiResponse<Message>),
        (status = 404, description = "Message not found")
    ),
    tag = "messages",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_message(
    RequireViewer(_user): RequireViewer,
    State(service): State<Arc<MessageService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Message>>> {
    let message = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(message), None, None)))
}

/// Change status, priority or tags of a message
#[utoipa::path(
    put,
    path = "/api/database/messages/{id}",
    params(
        ("id" = i64, Path, description = "Message ID")
    ),
    request_body = UpdateMessageDto,
    responses(
        (status = 200, description = "Message updated successfully", body = ApiResponse<Message>),
        (status = 404, description = "Message not found"),
        (status = 403, description = "Forbidden - editor or admin only")
    ),
    tag = "messages",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_message(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<MessageService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateMessageDto>,
) -> Result<Json<ApiResponse<Message>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let message = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(message), None, None)))
}

/// Archive a message (soft delete)
#[utoipa::path(
    delete,
    path = "/api/database/messages/{id}",
    params(
        ("id" = i64, Path, description = "Message ID")
    ),
    responses(
        (status = 200, description = "Message archived", body = ApiResponse<Message>),
        (status = 404, description = "Message not found"),
        (status = 403, description = "Forbidden - editor or admin only")
    ),
    tag = "messages",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_message(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<MessageService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Message>>> {
    let message = service.soft_delete(id).await?;
    Ok(Json(ApiResponse::success(Some(message), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/database/messages/{id}/restore",
    params(
        ("id" = i64, Path, description = "Message ID")
    ),
    responses(
        (status = 200, description = "Message restored", body = ApiResponse<Message>),
        (status = 404, description = "Message not found"),
        (status = 403, description = "Forbidden - editor or admin only")
    ),
    tag = "messages",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn restore_message(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<MessageService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Message>>> {
    let message = service.restore(id).await?;
    Ok(Json(ApiResponse::success(Some(message), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/database/messages/{id}/read",
    params(
        ("id" = i64, Path, description = "Message ID")
    ),
    responses(
        (status = 200, description = "Message marked as read", body = ApiResponse<Message>),
        (status = 404, description = "Message not found")
    ),
    tag = "messages",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn mark_message_read(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<MessageService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Message>>> {
    let message = service.mark_read(id).await?;
    Ok(Json(ApiResponse::success(Some(message), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/database/messages/{id}/replied",
    params(
        ("id" = i64, Path, description = "Message ID")
    ),
    responses(
        (status = 200, description = "Message marked as replied", body = ApiResponse<Message>),
        (status = 404, description = "Message not found")
    ),
    tag = "messages",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn mark_message_replied(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<MessageService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Message>>> {
    let message = service.mark_replied(id).await?;
    Ok(Json(ApiResponse::success(Some(message), None, None)))
}

#[utoipa::path(
    put,
    path = "/api/database/messages/{id}/priority",
    params(
        ("id" = i64, Path, description = "Message ID")
    ),
    request_body = ChangePriorityDto,
    responses(
        (status = 200, description = "Priority changed", body = ApiResponse<Message>),
        (status = 400, description = "Unknown priority"),
        (status = 404, description = "Message not found")
    ),
    tag = "messages",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn change_message_priority(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<MessageService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<ChangePriorityDto>,
) -> Result<Json<ApiResponse<Message>>> {
    let message = service.change_priority(id, dto.priority).await?;
    Ok(Json(ApiResponse::success(Some(message), None, None)))
}

/// Add tags, skipping ones already present
#[utoipa::path(
    post,
    path = "/api/database/messages/{id}/tags",
    params(
        ("id" = i64, Path, description = "Message ID")
    ),
    request_body = MessageTagsDto,
    responses(
        (status = 200, description = "Tags added", body = ApiResponse<Message>),
        (status = 404, description = "Message not found")
    ),
    tag = "messages",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_message_tags(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<MessageService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<MessageTagsDto>,
) -> Result<Json<ApiResponse<Message>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let message = service.add_tags(id, dto.tags).await?;
    Ok(Json(ApiResponse::success(Some(message), None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/database/messages/{id}/tags",
    params(
        ("id" = i64, Path, description = "Message ID")
    ),
    request_body = MessageTagsDto,
    responses(
        (status = 200, description = "Tags removed", body = ApiResponse<Message>),
        (status = 404, description = "Message not found")
    ),
    tag = "messages",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn remove_message_tags(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<MessageService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<MessageTagsDto>,
) -> Result<Json<ApiResponse<Message>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let message = service.remove_tags(id, dto.tags).await?;
    Ok(Json(ApiResponse::success(Some(message), None, None)))
}
