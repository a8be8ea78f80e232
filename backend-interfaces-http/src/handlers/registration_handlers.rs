use axum::extract::{Path, State};
use axum::Json;

use backend_application::commands::registration_commands;
use backend_application::AppState;
use backend_domain::Event;

use crate::error::HttpError;

pub async fn join_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, HttpError> {
    Ok(Json(registration_commands::join_event(&state, &id).await?))
}

pub async fn leave_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, HttpError> {
    Ok(Json(registration_commands::leave_event(&state, &id).await?))
}
