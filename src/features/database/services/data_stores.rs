use std::sync::Arc;

use crate::features::categories::models::CategoryKind;
use crate::features::categories::CategoryService;
use crate::features::gallery::models::GalleryImage;
use crate::features::messages::models::Message;
use crate::features::services::models::Service;
use crate::features::tips::models::CookingTip;
use crate::features::users::models::User;
use crate::modules::storage::StorageBackend;
use crate::shared::constants::{
    GALLERY_COLLECTION, MESSAGES_COLLECTION, SERVICES_COLLECTION, TIPS_COLLECTION,
    USERS_COLLECTION,
};
use crate::shared::entity::EntityStore;

/// One handle per stored collection, all over the same backend.
///
/// Feature services and the database tools share these handles so that
/// every writer of a collection goes through the same mutex.
#[derive(Clone)]
pub struct DataStores {
    pub backend: Arc<dyn StorageBackend>,
    pub services: Arc<EntityStore<Service>>,
    pub service_categories: Arc<CategoryService>,
    pub tips: Arc<EntityStore<CookingTip>>,
    pub tip_categories: Arc<CategoryService>,
    pub gallery: Arc<EntityStore<GalleryImage>>,
    pub gallery_categories: Arc<CategoryService>,
    pub users: Arc<EntityStore<User>>,
    pub messages: Arc<EntityStore<Message>>,
}

impl DataStores {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let services = Arc::new(EntityStore::new(Arc::clone(&backend), SERVICES_COLLECTION));
        let tips = Arc::new(EntityStore::new(Arc::clone(&backend), TIPS_COLLECTION));
        let gallery = Arc::new(EntityStore::new(Arc::clone(&backend), GALLERY_COLLECTION));

        Self {
            service_categories: Arc::new(CategoryService::new(
                CategoryKind::Services,
                Arc::clone(&backend),
                services.clone(),
            )),
            tip_categories: Arc::new(CategoryService::new(
                CategoryKind::Tips,
                Arc::clone(&backend),
                tips.clone(),
            )),
            gallery_categories: Arc::new(CategoryService::new(
                CategoryKind::Gallery,
                Arc::clone(&backend),
                gallery.clone(),
            )),
            users: Arc::new(EntityStore::new(Arc::clone(&backend), USERS_COLLECTION)),
            messages: Arc::new(EntityStore::new(Arc::clone(&backend), MESSAGES_COLLECTION)),
            services,
            tips,
            gallery,
            backend,
        }
    }

    pub fn categories(&self) -> [&Arc<CategoryService>; 3] {
        [
            &self.service_categories,
            &self.tip_categories,
            &self.gallery_categories,
        ]
    }
}
