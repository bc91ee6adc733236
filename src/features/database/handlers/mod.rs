pub mod database_handler;

pub use database_handler::*;
