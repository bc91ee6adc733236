use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::categories::models::CategoryKind;
use crate::features::messages::dtos::CreateMessageDto;
use crate::features::site::dtos::ContactReceiptDto;
use crate::features::site::services::SiteService;
use crate::shared::filtering::PublicListQuery;
use crate::shared::types::ApiResponse;

/// Public landing page
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Rendered landing page", content_type = "text/html", body = String)
    ),
    tag = "site"
)]
pub async fn index_page(State(site): State<Arc<SiteService>>) -> Result<Html<String>> {
    Ok(Html(site.render_page().await?))
}

/// HTML cards for one catalog
#[utoipa::path(
    get,
    path = "/fragments/{kind}",
    params(
        ("kind" = String, Path, description = "services, tips or gallery"),
        PublicListQuery
    ),
    responses(
        (status = 200, description = "Rendered fragment", content_type = "text/html", body = String),
        (status = 404, description = "Unknown catalog")
    ),
    tag = "site"
)]
pub async fn catalog_fragment(
    State(site): State<Arc<SiteService>>,
    Path(kind): Path<String>,
    AppQuery(query): AppQuery<PublicListQuery>,
) -> Result<Html<String>> {
    let kind = CategoryKind::from_path(&kind)
        .ok_or_else(|| AppError::NotFound(format!("No fragment named '{}'", kind)))?;
    Ok(Html(site.render_fragment(kind, &query).await?))
}

/// Contact form submission
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = CreateMessageDto,
    responses(
        (status = 201, description = "Message received", body = ApiResponse<ContactReceiptDto>),
        (status = 400, description = "Invalid form data")
    ),
    tag = "site"
)]
pub async fn submit_contact(
    State(site): State<Arc<SiteService>>,
    AppJson(dto): AppJson<CreateMessageDto>,
) -> Result<(StatusCode, Json<ApiResponse<ContactReceiptDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let message = site.submit_contact(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(ContactReceiptDto::from(&message)),
            Some("Gracias por contactarnos. Te responderemos pronto.".to_string()),
            None,
        )),
    ))
}
