use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use tracing::{error, warn};

use crate::errors::{ServiceError, ServiceResult};
use crate::handlers::AppState;
use crate::views::{error_message, main_layout, render_list, render_view};

/// `GET /`: every part in a table.
pub async fn list_page(State(state): State<AppState>) -> Response {
    match state.parts.all().await {
        Ok(parts) => page(render_list(&parts).and_then(|list| main_layout("Parts", &list))),
        Err(e) => {
            error!(error = %e, "Failed to list parts");
            error_page(&e)
        }
    }
}

/// `GET /part/{id}`: read-only card for a single part.
pub async fn part_page(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.parts.by_id(&id).await {
        Ok(part) => page(render_view(&part).and_then(|card| main_layout(&part.reference, &card))),
        Err(e) if e.is_not_found() => {
            warn!(part_id = %id, "Part page requested for unknown part");
            error_page(&e)
        }
        Err(e) => {
            error!(part_id = %id, error = %e, "Failed to load part");
            error_page(&e)
        }
    }
}

fn page(rendered: ServiceResult<String>) -> Response {
    match rendered {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render page");
            e.into_response()
        }
    }
}

fn error_page(err: &ServiceError) -> Response {
    let status = err.status_code();
    let heading = status.canonical_reason().unwrap_or("Error");
    match error_message(heading, &err.response_message())
        .and_then(|message| main_layout(heading, &message))
    {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render error page");
            e.into_response()
        }
    }
}
