use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::actions::{ActionRequest, ActionResponse};
use crate::errors::ServiceError;
use crate::handlers::AppState;

/// `POST /guiapi`: runs the named action and returns its UI patch.
pub async fn dispatch_action(
    State(state): State<AppState>,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> Result<Json<ActionResponse>, ServiceError> {
    let Json(request) =
        payload.map_err(|e| ServiceError::DeserializationError(e.body_text()))?;

    let result = state.actions.dispatch(&request.name, request.args).await?;
    Ok(Json(result.into()))
}
