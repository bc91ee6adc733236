pub mod cooking_tip;

pub use cooking_tip::{CookingTip, Difficulty};
