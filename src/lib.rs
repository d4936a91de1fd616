//! Parts inventory
//!
//! Server-rendered inventory of physical parts. Pages are plain HTML; buttons
//! call named actions over `POST /guiapi`, which answer with a markup patch
//! for `#container` or a redirect.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod actions;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod middleware_helpers;
pub mod migrator;
pub mod models;
pub mod repositories;
pub mod tracing;
pub mod views;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;

use crate::actions::ActionRegistry;
use crate::repositories::PartRepository;

#[derive(Clone)]
pub struct AppState {
    pub config: config::AppConfig,
    pub parts: Arc<dyn PartRepository>,
    pub actions: Arc<ActionRegistry>,
}

impl AppState {
    /// State with the standard part actions wired to `parts`.
    pub fn new(config: config::AppConfig, parts: Arc<dyn PartRepository>) -> Self {
        let actions = Arc::new(ActionRegistry::new(parts.clone()));
        Self {
            config,
            parts,
            actions,
        }
    }
}

/// Routes of the application, without state applied.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::pages::list_page))
        .route("/part/update-status", get(handlers::reserved::update_status))
        .route("/part/generate-qr", get(handlers::reserved::generate_qr))
        .route(
            "/part/export-to-excel",
            get(handlers::reserved::export_to_excel),
        )
        .route("/part/{id}", get(handlers::pages::part_page))
        .route("/guiapi", post(handlers::guiapi::dispatch_action))
        .route("/static/{*path}", get(handlers::assets::static_asset))
        .route("/health", get(handlers::health::health_check))
}

/// Full application: routes, HTTP tracing, compression and request ids.
/// CORS is left to the caller since it depends on deployment configuration.
pub fn app_router(state: AppState) -> Router {
    routes()
        .layer(crate::tracing::configure_http_tracing())
        .layer(CompressionLayer::new())
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
        .with_state(state)
}
