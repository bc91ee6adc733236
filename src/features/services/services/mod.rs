pub mod service_catalog_service;

pub use service_catalog_service::ServiceCatalogService;
