pub mod data_stores;
pub mod database_service;
pub mod seeder;

pub use data_stores::DataStores;
pub use database_service::DatabaseService;
pub use seeder::{SeedReport, Seeder};
