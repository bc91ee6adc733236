pub mod database_dto;

pub use database_dto::{ImportResultDto, ResetResultDto};
