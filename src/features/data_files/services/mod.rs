pub mod data_file_service;

pub use data_file_service::DataFileService;
