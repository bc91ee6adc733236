pub mod site_service;

pub use site_service::SiteService;
