pub mod service_dto;

pub use service_dto::{CreateServiceDto, UpdateServiceDto};
