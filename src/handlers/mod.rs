pub mod assets;
pub mod guiapi;
pub mod health;
pub mod pages;
pub mod reserved;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;
