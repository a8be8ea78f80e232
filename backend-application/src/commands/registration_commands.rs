use tracing::{info, warn};

use backend_domain::{Event, EventId};

use crate::commands::observe;
use crate::{AppError, AppState};

pub async fn join_event(state: &AppState, id: &str) -> Result<Event, AppError> {
    let id = EventId::from(id);
    let result = observe(state, state.store.join(&id).await);
    record(state, &id, "join", result)
}

pub async fn leave_event(state: &AppState, id: &str) -> Result<Event, AppError> {
    let id = EventId::from(id);
    let result = observe(state, state.store.leave(&id).await);
    record(state, &id, "leave", result)
}

fn record(
    state: &AppState,
    id: &EventId,
    action: &'static str,
    result: Result<Event, AppError>,
) -> Result<Event, AppError> {
    match &result {
        Ok(event) => {
            if action == "join" {
                state.metrics.record_join();
            } else {
                state.metrics.record_leave();
            }
            info!(
                event_id = %event.id,
                action,
                participants = event.current_participants,
                max = event.max_participants,
                status = %event.status,
                "registration changed"
            );
        }
        Err(AppError::Registration(err)) => {
            state.metrics.record_registration_rejection();
            warn!(event_id = %id, action, kind = err.kind(), "registration rejected: {}", err);
        }
        Err(_) => {}
    }
    result
}
