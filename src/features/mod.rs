pub mod auth;
pub mod categories;
pub mod data_files;
pub mod database;
pub mod gallery;
pub mod messages;
pub mod services;
pub mod site;
pub mod tips;
pub mod users;
