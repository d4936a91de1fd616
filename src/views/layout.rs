use tera::Context;

use crate::errors::ServiceResult;
use crate::views::templates::render;

/// Selector of the element every container-replace action targets.
pub const CONTAINER_SELECTOR: &str = "#container";

/// Wraps already rendered `content` in the full HTML document used by every
/// page.
pub fn main_layout(title: &str, content: &str) -> ServiceResult<String> {
    let mut context = Context::new();
    context.insert("title", title);
    context.insert("content", content);
    render("layout.html", &context)
}

/// Content shown when a page cannot render its subject.
pub fn error_message(heading: &str, detail: &str) -> ServiceResult<String> {
    let mut context = Context::new();
    context.insert("heading", heading);
    context.insert("detail", detail);
    render("error.html", &context)
}
