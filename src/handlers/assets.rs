use axum::{
    extract::Path,
    http::header,
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

use crate::errors::ServiceError;

/// Files under `static/`, compiled into the binary.
#[derive(RustEmbed)]
#[folder = "static/"]
pub struct Assets;

/// `GET /static/{*path}`: embedded client assets such as `guiapi.js`.
pub async fn static_asset(Path(path): Path<String>) -> Response {
    match Assets::get(&path) {
        Some(content) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                [
                    (header::CONTENT_TYPE, mime.as_ref().to_string()),
                    (header::CACHE_CONTROL, "public, max-age=3600".to_string()),
                ],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => ServiceError::NotFound(format!("Asset {} not found", path)).into_response(),
    }
}
