pub mod category;

pub use category::{generate_category_id, Category, CategoryKind};
