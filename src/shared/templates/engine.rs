//! HTML template engine for the public site.
//!
//! Built-in templates are compiled into the binary. A templates directory can
//! override any of them by relative path (e.g. `fragments/tips.html.jinja`).

use minijinja::{AutoEscape, Environment};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

pub const INDEX_TEMPLATE: &str = "index.html.jinja";
pub const SERVICES_FRAGMENT: &str = "fragments/services.html.jinja";
pub const TIPS_FRAGMENT: &str = "fragments/tips.html.jinja";
pub const GALLERY_FRAGMENT: &str = "fragments/gallery.html.jinja";

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (
        INDEX_TEMPLATE,
        include_str!("../../../templates/site/index.html.jinja"),
    ),
    (
        SERVICES_FRAGMENT,
        include_str!("../../../templates/site/fragments/services.html.jinja"),
    ),
    (
        TIPS_FRAGMENT,
        include_str!("../../../templates/site/fragments/tips.html.jinja"),
    ),
    (
        GALLERY_FRAGMENT,
        include_str!("../../../templates/site/fragments/gallery.html.jinja"),
    ),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Engine with only the compiled-in templates
    pub fn builtin() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);

        for (name, source) in BUILTIN_TEMPLATES {
            if let Err(e) = env.add_template(name, source) {
                tracing::error!("Failed to load built-in template {}: {}", name, e);
            }
        }

        Self { env }
    }

    /// Built-in templates, overridden by any `.jinja` file found under `dir`
    pub fn load(dir: &Path) -> Self {
        let mut engine = Self::builtin();
        if dir.is_dir() {
            load_templates_recursive(&mut engine.env, dir, dir);
        } else {
            tracing::debug!(
                "Template directory {} not found, using built-in templates",
                dir.display()
            );
        }
        tracing::debug!("Templates available: {}", engine.template_names().join(", "));
        engine
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, TemplateError> {
        let template = self
            .env
            .get_template(name)
            .map_err(|_| TemplateError::NotFound(name.to_string()))?;

        template
            .render(ctx)
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }

    pub fn template_names(&self) -> Vec<String> {
        self.env
            .templates()
            .map(|(name, _)| name.to_string())
            .collect()
    }
}

/// Recursively load all .jinja templates from a directory
fn load_templates_recursive(env: &mut Environment<'static>, base_path: &Path, current_path: &Path) {
    let entries = match std::fs::read_dir(current_path) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Cannot read {}: {}", current_path.display(), e);
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            load_templates_recursive(env, base_path, &path);
            continue;
        }
        if !path.extension().is_some_and(|ext| ext == "jinja") {
            continue;
        }
        let Ok(relative) = path.strip_prefix(base_path) else {
            continue;
        };
        // Template names always use forward slashes
        let template_name = relative.to_string_lossy().replace('\\', "/");

        match std::fs::read_to_string(&path) {
            Ok(content) => {
                // Templates live for the whole process
                let static_name: &'static str = Box::leak(template_name.clone().into_boxed_str());
                let static_content: &'static str = Box::leak(content.into_boxed_str());
                if let Err(e) = env.add_template(static_name, static_content) {
                    tracing::warn!("Failed to load template {}: {}", template_name, e);
                } else {
                    tracing::debug!("Loaded template: {}", template_name);
                }
            }
            Err(e) => tracing::warn!("Failed to read template {}: {}", path.display(), e),
        }
    }
}
