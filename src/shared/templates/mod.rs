//! Server-side rendering of the public site pages and fragments.

pub mod engine;

pub use engine::{
    TemplateEngine, TemplateError, GALLERY_FRAGMENT, INDEX_TEMPLATE, SERVICES_FRAGMENT,
    TIPS_FRAGMENT,
};
