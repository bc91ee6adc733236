pub mod constants;
pub mod entity;
pub mod filtering;
pub mod templates;
pub mod test_helpers;
pub mod types;
pub mod validation;
