use tracing::info;

use backend_domain::{Event, EventId, EventPatch, NewEvent};

use crate::commands::observe;
use crate::{AppError, AppState};

pub async fn create_event(state: &AppState, payload: NewEvent) -> Result<Event, AppError> {
    let event = observe(state, state.store.add(payload).await)?;
    state.metrics.record_created();
    info!(event_id = %event.id, title = %event.title, "event created");
    Ok(event)
}

pub async fn update_event(
    state: &AppState,
    id: &str,
    patch: EventPatch,
) -> Result<Event, AppError> {
    let id = EventId::from(id);
    let event = observe(state, state.store.update(&id, &patch).await)?;
    if !patch.is_empty() {
        state.metrics.record_updated();
        info!(event_id = %event.id, status = %event.status, "event updated");
    }
    Ok(event)
}

pub async fn delete_event(state: &AppState, id: &str) -> Result<Event, AppError> {
    let id = EventId::from(id);
    let event = observe(state, state.store.delete(&id).await)?;
    state.metrics.record_deleted();
    info!(event_id = %event.id, "event deleted");
    Ok(event)
}

/// Replaces the whole collection with the seed set.
pub async fn reset_events(state: &AppState) -> Result<usize, AppError> {
    let count = observe(state, state.store.initialize(true).await)?;
    info!(count, "event collection reset");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use backend_domain::RuntimeConfig;

    use super::*;
    use crate::store::tests::{store_with, MemoryRepo};

    fn state_with(repo: Arc<MemoryRepo>) -> AppState {
        let store = store_with(repo, vec![NewEvent::titled("Seeded")]);
        AppState::new(RuntimeConfig::default(), Arc::new(store))
    }

    #[tokio::test]
    async fn create_update_delete_round() {
        let state = state_with(Arc::new(MemoryRepo::default()));
        let created = create_event(&state, NewEvent::titled("Beach Night"))
            .await
            .expect("create");
        let patch = EventPatch {
            fee: Some("Free".to_string()),
            ..EventPatch::default()
        };
        let updated = update_event(&state, created.id.as_str(), patch)
            .await
            .expect("update");
        assert_eq!(updated.fee.as_deref(), Some("Free"));

        delete_event(&state, created.id.as_str()).await.expect("delete");
        let err = delete_event(&state, created.id.as_str())
            .await
            .expect_err("already gone");
        assert!(matches!(err, AppError::NotFound(_)));

        let rendered = state.metrics.render_prometheus();
        assert!(rendered.contains("court_events_created_total 1\n"));
        assert!(rendered.contains("court_events_updated_total 1\n"));
        assert!(rendered.contains("court_events_deleted_total 1\n"));
    }

    #[tokio::test]
    async fn persistence_failures_are_counted() {
        let repo = Arc::new(MemoryRepo::default());
        let state = state_with(repo.clone());
        repo.fail_saves(true);
        let err = create_event(&state, NewEvent::titled("Lost"))
            .await
            .expect_err("save fails");
        assert_eq!(err.kind(), "persistence");
        assert!(state
            .metrics
            .render_prometheus()
            .contains("court_persistence_errors_total 1\n"));
    }

    #[tokio::test]
    async fn reset_restores_the_seed_set() {
        let state = state_with(Arc::new(MemoryRepo::default()));
        create_event(&state, NewEvent::titled("Extra")).await.expect("create");
        assert_eq!(reset_events(&state).await.expect("reset"), 1);
        let all = state.store.get_all().await.expect("get_all");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Seeded");
    }
}
