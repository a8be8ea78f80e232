use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use tracing::warn;

use backend_application::commands::event_commands;
use backend_application::dtos::{DropInQuery, RecentQuery, RelatedQuery};
use backend_application::queries::event_queries;
use backend_application::AppState;
use backend_domain::{Event, EventPatch, NewEvent};

use crate::error::HttpError;
use crate::middleware::parse_json;

type Events = Result<Json<Vec<Event>>, HttpError>;

pub async fn list_events(State(state): State<AppState>) -> Events {
    Ok(Json(event_queries::list_events(&state).await?))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, HttpError> {
    event_queries::get_event(&state, &id)
        .await?
        .map(Json)
        .ok_or_else(|| HttpError::NotFound(format!("event {} not found", id.trim())))
}

pub async fn featured_events(State(state): State<AppState>) -> Events {
    Ok(Json(event_queries::featured_events(&state).await?))
}

pub async fn upcoming_open_events(State(state): State<AppState>) -> Events {
    Ok(Json(event_queries::upcoming_open_events(&state).await?))
}

pub async fn recent_events(
    State(state): State<AppState>,
    Query(params): Query<RecentQuery>,
) -> Events {
    Ok(Json(event_queries::recent_events(&state, params).await?))
}

pub async fn search_events(State(state): State<AppState>, Path(text): Path<String>) -> Events {
    Ok(Json(event_queries::search_events(&state, &text).await?))
}

pub async fn related_events(
    State(state): State<AppState>,
    Query(params): Query<RelatedQuery>,
) -> Events {
    Ok(Json(event_queries::related_events(&state, params).await?))
}

pub async fn drop_in_sessions(
    State(state): State<AppState>,
    Query(params): Query<DropInQuery>,
) -> Events {
    Ok(Json(event_queries::drop_in_sessions(&state, params).await?))
}

pub async fn events_by_category(State(state): State<AppState>, Path(name): Path<String>) -> Events {
    Ok(Json(event_queries::events_by_category(&state, &name).await?))
}

pub async fn events_by_level(State(state): State<AppState>, Path(name): Path<String>) -> Events {
    Ok(Json(event_queries::events_by_level(&state, &name).await?))
}

pub async fn create_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Event>), HttpError> {
    let payload: NewEvent = parse_json(&headers, &body).map_err(|err| {
        warn!("rejected create payload: {}", err);
        HttpError::BadRequest(err.to_string())
    })?;
    let event = event_commands::create_event(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Event>, HttpError> {
    let patch: EventPatch = parse_json(&headers, &body).map_err(|err| {
        warn!(id = %id, "rejected update payload: {}", err);
        HttpError::BadRequest(err.to_string())
    })?;
    Ok(Json(event_commands::update_event(&state, &id, patch).await?))
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, HttpError> {
    Ok(Json(event_commands::delete_event(&state, &id).await?))
}
