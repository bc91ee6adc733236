pub mod fixtures;
pub mod snapshot;

pub use fixtures::{GalleryFixture, ServicesFixture, TipsFixture, UsersFixture};
pub use snapshot::{CategoryTotals, DatabaseSnapshot, DatabaseStats};
