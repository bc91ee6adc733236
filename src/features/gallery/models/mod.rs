pub mod gallery_image;

pub use gallery_image::{filename_from_url, GalleryImage};
