pub mod service_handler;

pub use service_handler::*;
