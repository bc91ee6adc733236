pub mod data_file_handler;

pub use data_file_handler::*;
