//! Command channel handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use super::state::AppState;
use crate::dispatch::{CommandRequest, CommandResponse};

/// Handle POST /api/command - dispatch one named command.
///
/// The HTTP status is always 200: the outcome (success payload, error
/// record, or not-implemented) travels in the body, exactly one
/// response per request. A print job suspends this handler until the
/// terminal driver event arrives, then resolves the same response.
pub async fn command(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CommandRequest>,
) -> Json<CommandResponse> {
    Json(state.dispatcher.dispatch(&request).await)
}
