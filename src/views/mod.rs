//! Server-side HTML rendering. Every function here takes part values and
//! returns markup rendered from the bundled Tera templates.

pub mod layout;
pub mod list;
pub mod part;
mod templates;

pub use layout::{error_message, main_layout, CONTAINER_SELECTOR};
pub use list::render_list;
pub use part::{render_edit, render_view};
