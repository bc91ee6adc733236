pub mod tip_dto;

pub use tip_dto::{CreateTipDto, UpdateTipDto};
