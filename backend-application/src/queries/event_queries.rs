use chrono::{Local, NaiveDate};

use backend_domain::services::query;
use backend_domain::{DateWindow, DropInFilter, Event, EventId, EventStatus};

use crate::dtos::{DropInQuery, RecentQuery, RelatedQuery};
use crate::{AppError, AppState};

const MAX_RECENT_LIMIT: usize = 200;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub async fn list_events(state: &AppState) -> Result<Vec<Event>, AppError> {
    state.store.get_all().await
}

pub async fn get_event(state: &AppState, id: &str) -> Result<Option<Event>, AppError> {
    state.store.get_by_id(&EventId::from(id)).await
}

pub async fn featured_events(state: &AppState) -> Result<Vec<Event>, AppError> {
    let events = state.store.get_all().await?;
    Ok(query::featured(&events, today()))
}

/// Featured events that are still open, as served by the upcoming endpoint.
pub async fn upcoming_open_events(state: &AppState) -> Result<Vec<Event>, AppError> {
    let events = state.store.get_all().await?;
    Ok(query::featured_open(&events, today()))
}

pub async fn recent_events(state: &AppState, params: RecentQuery) -> Result<Vec<Event>, AppError> {
    let events = state.store.get_all().await?;
    let mut sorted = query::recent(&events);
    if let Some(limit) = params.limit {
        sorted.truncate(limit.clamp(1, MAX_RECENT_LIMIT));
    }
    Ok(sorted)
}

pub async fn events_by_category(state: &AppState, name: &str) -> Result<Vec<Event>, AppError> {
    let events = state.store.get_all().await?;
    Ok(query::by_category(&events, name))
}

pub async fn events_by_level(state: &AppState, name: &str) -> Result<Vec<Event>, AppError> {
    let events = state.store.get_all().await?;
    Ok(query::by_level(&events, name))
}

pub async fn search_events(state: &AppState, text: &str) -> Result<Vec<Event>, AppError> {
    let events = state.store.get_all().await?;
    Ok(query::search(&events, text))
}

pub async fn related_events(state: &AppState, params: RelatedQuery) -> Result<Vec<Event>, AppError> {
    let events = state.store.get_all().await?;
    let exclude = params.exclude.map(EventId::from);
    Ok(query::related(
        &events,
        non_blank(params.category.as_deref()),
        non_blank(params.level.as_deref()),
        exclude.as_ref(),
    ))
}

pub async fn drop_in_sessions(state: &AppState, params: DropInQuery) -> Result<Vec<Event>, AppError> {
    let filter = parse_drop_in_filter(params)?;
    let events = state.store.get_all().await?;
    Ok(query::drop_in(&events, &filter, today()))
}

/// "All" and blank values mean no constraint; anything else must parse.
pub fn parse_drop_in_filter(params: DropInQuery) -> Result<DropInFilter, AppError> {
    let status = match selected(params.status.as_deref()) {
        Some(raw) => Some(
            EventStatus::parse(raw)
                .ok_or_else(|| AppError::Validation(format!("unknown status '{}'", raw)))?,
        ),
        None => None,
    };
    let window = match selected(params.date.as_deref()) {
        Some(raw) => Some(
            DateWindow::parse(raw)
                .ok_or_else(|| AppError::Validation(format!("unknown date window '{}'", raw)))?,
        ),
        None => None,
    };
    Ok(DropInFilter {
        city: selected(params.city.as_deref()).map(ToString::to_string),
        status,
        window,
    })
}

fn selected(value: Option<&str>) -> Option<&str> {
    non_blank(value).filter(|value| !value.eq_ignore_ascii_case("all"))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Days;

    use backend_domain::{NewEvent, RuntimeConfig, EVENT_DATE_FORMAT};

    use super::*;
    use crate::store::tests::{store_with, MemoryRepo};

    fn dated(title: &str, date: NaiveDate) -> NewEvent {
        NewEvent {
            event_date: Some(date.format(EVENT_DATE_FORMAT).to_string()),
            ..NewEvent::titled(title)
        }
    }

    async fn state_with(events: Vec<NewEvent>) -> AppState {
        let store = store_with(Arc::new(MemoryRepo::default()), Vec::new());
        for event in events {
            store.add(event).await.expect("add");
        }
        AppState::new(RuntimeConfig::default(), Arc::new(store))
    }

    #[tokio::test]
    async fn featured_returns_only_future_events() {
        let today = today();
        let past = today.checked_sub_days(Days::new(3)).expect("date");
        let future = today.checked_add_days(Days::new(3)).expect("date");
        let state = state_with(vec![dated("Past Game", past), dated("Future Game", future)]).await;

        let featured = featured_events(&state).await.expect("featured");
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].title, "Future Game");
    }

    #[tokio::test]
    async fn upcoming_skips_full_events() {
        let future = today().checked_add_days(Days::new(1)).expect("date");
        let full = NewEvent {
            status: Some(EventStatus::Full),
            ..dated("Packed", future)
        };
        let state = state_with(vec![full, dated("Roomy", future)]).await;
        assert_eq!(featured_events(&state).await.expect("featured").len(), 2);
        let upcoming = upcoming_open_events(&state).await.expect("upcoming");
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].title, "Roomy");
    }

    #[tokio::test]
    async fn recent_limit_truncates_newest_first() {
        let state = state_with(vec![
            NewEvent::titled("First"),
            NewEvent::titled("Second"),
            NewEvent::titled("Third"),
        ])
        .await;
        let all = recent_events(&state, RecentQuery::default()).await.expect("recent");
        assert_eq!(all.len(), 3);
        let limited = recent_events(&state, RecentQuery { limit: Some(2) })
            .await
            .expect("recent");
        assert_eq!(limited.len(), 2);
        assert!(limited[0].created_at >= limited[1].created_at);
    }

    #[tokio::test]
    async fn related_ignores_blank_parameters() {
        let league = NewEvent {
            category: Some("League".to_string()),
            ..NewEvent::titled("League A")
        };
        let state = state_with(vec![league, NewEvent::titled("Uncategorized")]).await;
        let params = RelatedQuery {
            category: Some("League".to_string()),
            level: Some("  ".to_string()),
            exclude: None,
        };
        let related = related_events(&state, params).await.expect("related");
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].title, "League A");
    }

    #[test]
    fn drop_in_filter_parsing() {
        let filter = parse_drop_in_filter(DropInQuery {
            city: Some("All".to_string()),
            status: Some("open".to_string()),
            date: Some("This Week".to_string()),
        })
        .expect("valid");
        assert_eq!(filter.city, None);
        assert_eq!(filter.status, Some(EventStatus::Open));
        assert_eq!(filter.window, Some(DateWindow::ThisWeek));

        let err = parse_drop_in_filter(DropInQuery {
            status: Some("waitlist".to_string()),
            ..DropInQuery::default()
        })
        .expect_err("bad status");
        assert_eq!(err.kind(), "validation");
    }
}
