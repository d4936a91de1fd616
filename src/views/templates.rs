//! Tera templates compiled into the binary from `templates/`.
//!
//! Every template name ends in `.html`, so Tera autoescapes each variable
//! unless the template marks it `safe`.

use rust_embed::RustEmbed;
use std::sync::OnceLock;
use tera::{Context, Tera};
use tracing::debug;

use crate::errors::{ServiceError, ServiceResult};

#[derive(RustEmbed)]
#[folder = "templates/"]
struct TemplateFiles;

static TEMPLATES: OnceLock<Tera> = OnceLock::new();

fn load() -> ServiceResult<Tera> {
    let mut tera = Tera::default();
    for name in TemplateFiles::iter() {
        let file = TemplateFiles::get(&name).ok_or_else(|| {
            ServiceError::InternalError(format!("Template {} vanished from the bundle", name))
        })?;
        let source = std::str::from_utf8(&file.data).map_err(|e| {
            ServiceError::InternalError(format!("Template {} is not UTF-8: {}", name, e))
        })?;
        tera.add_raw_template(&name, source).map_err(|e| {
            ServiceError::InternalError(format!("Failed to add template {}: {}", name, e))
        })?;
    }
    debug!(count = tera.get_template_names().count(), "View templates loaded");
    Ok(tera)
}

fn templates() -> ServiceResult<&'static Tera> {
    if let Some(tera) = TEMPLATES.get() {
        return Ok(tera);
    }
    let tera = load()?;
    Ok(TEMPLATES.get_or_init(|| tera))
}

/// Renders template `name` with `context`.
pub(crate) fn render(name: &str, context: &Context) -> ServiceResult<String> {
    templates()?.render(name, context).map_err(|e| {
        ServiceError::InternalError(format!("Failed to render template {}: {}", name, e))
    })
}
