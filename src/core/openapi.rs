use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::categories::{
    dtos as categories_dtos, handlers as categories_handlers, models as categories_models,
};
use crate::features::data_files::handlers as data_files_handlers;
use crate::features::database::{
    dtos as database_dtos, handlers as database_handlers, models as database_models,
};
use crate::features::gallery::{
    dtos as gallery_dtos, handlers as gallery_handlers, models as gallery_models,
};
use crate::features::messages::{
    dtos as messages_dtos, handlers as messages_handlers, models as messages_models,
};
use crate::features::services::{
    dtos as services_dtos, handlers as services_handlers, models as services_models,
};
use crate::features::site::{dtos as site_dtos, handlers as site_handlers};
use crate::features::tips::{dtos as tips_dtos, handlers as tips_handlers, models as tips_models};
use crate::features::users::{
    dtos as users_dtos, handlers as users_handlers, models as users_models,
};
use crate::shared::entity::EntityCounts;
use crate::shared::types::{ApiResponse, Meta, ReorderDto, ReorderResultDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::login,
        auth_handlers::logout,
        auth_handlers::get_me,
        // Users
        users_handlers::list_users,
        users_handlers::get_user,
        users_handlers::create_user,
        users_handlers::update_user,
        users_handlers::delete_user,
        users_handlers::restore_user,
        // Services
        services_handlers::list_services,
        services_handlers::search_services,
        services_handlers::list_active_services,
        services_handlers::get_service,
        services_handlers::create_service,
        services_handlers::update_service,
        services_handlers::delete_service,
        services_handlers::restore_service,
        services_handlers::reorder_services,
        // Tips
        tips_handlers::list_tips,
        tips_handlers::search_tips,
        tips_handlers::list_active_tips,
        tips_handlers::get_tip,
        tips_handlers::create_tip,
        tips_handlers::update_tip,
        tips_handlers::delete_tip,
        tips_handlers::restore_tip,
        tips_handlers::reorder_tips,
        // Gallery
        gallery_handlers::list_images,
        gallery_handlers::search_images,
        gallery_handlers::list_active_images,
        gallery_handlers::get_image,
        gallery_handlers::create_image,
        gallery_handlers::update_image,
        gallery_handlers::delete_image,
        gallery_handlers::restore_image,
        gallery_handlers::reorder_images,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Messages
        messages_handlers::list_messages,
        messages_handlers::message_stats,
        messages_handlers::cleanup_messages,
        messages_handlers::get_message,
        messages_handlers::update_message,
        messages_handlers::delete_message,
        messages_handlers::restore_message,
        messages_handlers::mark_message_read,
        messages_handlers::mark_message_replied,
        messages_handlers::change_message_priority,
        messages_handlers::add_message_tags,
        messages_handlers::remove_message_tags,
        // Database tools
        database_handlers::get_stats,
        database_handlers::export_database,
        database_handlers::import_database,
        database_handlers::reset_database,
        // Site (public)
        site_handlers::index_page,
        site_handlers::catalog_fragment,
        site_handlers::submit_contact,
        // Data files
        data_files_handlers::get_data_file,
        data_files_handlers::save_data_file,
    ),
    components(
        schemas(
            // Shared
            Meta,
            EntityCounts,
            ReorderDto,
            ReorderResultDto,
            ApiResponse<ReorderResultDto>,
            ApiResponse<String>,
            // Auth
            auth_dtos::LoginRequestDto,
            auth_dtos::LoginResponseDto,
            ApiResponse<auth_dtos::LoginResponseDto>,
            // Users
            users_models::Role,
            users_dtos::CreateUserDto,
            users_dtos::UpdateUserDto,
            users_dtos::UserResponseDto,
            ApiResponse<users_dtos::UserResponseDto>,
            ApiResponse<Vec<users_dtos::UserResponseDto>>,
            // Services
            services_models::Service,
            services_dtos::CreateServiceDto,
            services_dtos::UpdateServiceDto,
            ApiResponse<services_models::Service>,
            ApiResponse<Vec<services_models::Service>>,
            // Tips
            tips_models::Difficulty,
            tips_models::CookingTip,
            tips_dtos::CreateTipDto,
            tips_dtos::UpdateTipDto,
            ApiResponse<tips_models::CookingTip>,
            ApiResponse<Vec<tips_models::CookingTip>>,
            // Gallery
            gallery_models::GalleryImage,
            gallery_dtos::CreateImageDto,
            gallery_dtos::UpdateImageDto,
            ApiResponse<gallery_models::GalleryImage>,
            ApiResponse<Vec<gallery_models::GalleryImage>>,
            // Categories
            categories_models::CategoryKind,
            categories_models::Category,
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            ApiResponse<categories_models::Category>,
            ApiResponse<Vec<categories_models::Category>>,
            // Messages
            messages_models::MessageStatus,
            messages_models::MessagePriority,
            messages_models::Message,
            messages_models::PriorityCounts,
            messages_models::RecentCounts,
            messages_models::MessageStats,
            messages_dtos::CreateMessageDto,
            messages_dtos::UpdateMessageDto,
            messages_dtos::ChangePriorityDto,
            messages_dtos::MessageTagsDto,
            messages_dtos::CleanupMessagesDto,
            messages_dtos::CleanupResultDto,
            ApiResponse<messages_models::Message>,
            ApiResponse<Vec<messages_models::Message>>,
            ApiResponse<messages_models::MessageStats>,
            ApiResponse<messages_dtos::CleanupResultDto>,
            // Database tools
            database_models::DatabaseSnapshot,
            database_models::CategoryTotals,
            database_models::DatabaseStats,
            database_dtos::ImportResultDto,
            database_dtos::ResetResultDto,
            ApiResponse<database_models::DatabaseStats>,
            ApiResponse<database_dtos::ImportResultDto>,
            ApiResponse<database_dtos::ResetResultDto>,
            // Site
            site_dtos::ContactReceiptDto,
            ApiResponse<site_dtos::ContactReceiptDto>,
        )
    ),
    tags(
        (name = "auth", description = "Back-office login sessions"),
        (name = "users", description = "Back-office user management (admin only)"),
        (name = "services", description = "Catering services catalog"),
        (name = "tips", description = "Cooking tips catalog"),
        (name = "gallery", description = "Photo gallery catalog"),
        (name = "categories", description = "Per-catalog categories"),
        (name = "messages", description = "Contact message inbox"),
        (name = "database", description = "Statistics, backup, restore and reset"),
        (name = "site", description = "Public pages and contact form"),
        (name = "data", description = "Raw JSON data files"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Sabores Ancestrales API",
        version = "0.1.0",
        description = "Catering site and back-office API for Sabores Ancestrales",
    )
)]
pub struct ApiDoc;

/// Adds the session bearer token scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("opaque")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_public_and_admin_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/",
            "/api/contact",
            "/api/database/auth",
            "/api/database/export",
            "/api/database/messages/{id}/tags",
            "/api/data/{filename}",
        ] {
            assert!(paths.contains_key(path), "missing {}", path);
        }
        assert!(doc
            .components
            .as_ref()
            .is_some_and(|c| c.security_schemes.contains_key("bearer_auth")));
    }
}
