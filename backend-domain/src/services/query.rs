// Query engine
// Side-effect-free filters and sorts over a snapshot of the collection.
// Missing fields never match; nothing here fails.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::entities::Event;
use crate::value_objects::{EventId, EventStatus};

pub const FEATURED_LIMIT: usize = 5;
pub const RELATED_LIMIT: usize = 3;
pub const DROP_IN_CATEGORY: &str = "Drop-in";

/// Events dated today or later, soonest first, at most five.
pub fn featured(events: &[Event], today: NaiveDate) -> Vec<Event> {
    let mut upcoming = events
        .iter()
        .filter(|event| event.event_date.map(|date| date >= today).unwrap_or(false))
        .cloned()
        .collect::<Vec<_>>();
    upcoming.sort_by_key(|event| event.event_date);
    upcoming.truncate(FEATURED_LIMIT);
    upcoming
}

/// `featured` restricted to events still accepting players.
pub fn featured_open(events: &[Event], today: NaiveDate) -> Vec<Event> {
    let open = events
        .iter()
        .filter(|event| event.status == EventStatus::Open)
        .cloned()
        .collect::<Vec<_>>();
    featured(&open, today)
}

/// Newest first by creation time. Callers truncate for display.
pub fn recent(events: &[Event]) -> Vec<Event> {
    let mut sorted = events.to_vec();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

pub fn by_category(events: &[Event], name: &str) -> Vec<Event> {
    events
        .iter()
        .filter(|event| event.category.as_deref() == Some(name))
        .cloned()
        .collect()
}

pub fn by_level(events: &[Event], name: &str) -> Vec<Event> {
    events
        .iter()
        .filter(|event| event.level.as_deref() == Some(name))
        .cloned()
        .collect()
}

/// Case-insensitive substring match against any descriptive field.
pub fn search(events: &[Event], query: &str) -> Vec<Event> {
    let needle = query.trim().to_lowercase();
    events
        .iter()
        .filter(|event| matches_search(event, &needle))
        .cloned()
        .collect()
}

fn matches_search(event: &Event, needle: &str) -> bool {
    let contains = |value: Option<&str>| {
        value
            .map(|text| text.to_lowercase().contains(needle))
            .unwrap_or(false)
    };
    contains(Some(&event.title))
        || contains(event.description.as_deref())
        || contains(event.level.as_deref())
        || contains(event.location.as_deref())
        || contains(event.category.as_deref())
        || contains(event.ages.as_deref())
        || contains(event.event_time.as_deref())
}

/// Events sharing the category or the level, minus the one being viewed.
pub fn related(
    events: &[Event],
    category: Option<&str>,
    level: Option<&str>,
    exclude: Option<&EventId>,
) -> Vec<Event> {
    let same = |field: Option<&str>, wanted: Option<&str>| match (field, wanted) {
        (Some(field), Some(wanted)) => field == wanted,
        _ => false,
    };
    events
        .iter()
        .filter(|event| exclude.map(|id| event.id != *id).unwrap_or(true))
        .filter(|event| {
            same(event.category.as_deref(), category) || same(event.level.as_deref(), level)
        })
        .take(RELATED_LIMIT)
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateWindow {
    Today,
    ThisWeek,
    ThisMonth,
}

impl DateWindow {
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value
            .trim()
            .to_lowercase()
            .replace(['-', '_', ' '], "");
        match normalized.as_str() {
            "today" => Some(DateWindow::Today),
            "thisweek" | "week" => Some(DateWindow::ThisWeek),
            "thismonth" | "month" => Some(DateWindow::ThisMonth),
            _ => None,
        }
    }

    /// Inclusive day range the window covers, starting today.
    pub fn range(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let end = match self {
            DateWindow::Today => today,
            DateWindow::ThisWeek => today.checked_add_days(Days::new(7)).unwrap_or(NaiveDate::MAX),
            DateWindow::ThisMonth => end_of_month(today),
        };
        (today, end)
    }
}

fn end_of_month(today: NaiveDate) -> NaiveDate {
    let (year, month) = if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(today)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropInFilter {
    pub city: Option<String>,
    pub status: Option<EventStatus>,
    pub window: Option<DateWindow>,
}

/// Drop-in sessions narrowed by city, status and date window.
pub fn drop_in(events: &[Event], filter: &DropInFilter, today: NaiveDate) -> Vec<Event> {
    let range = filter.window.map(|window| window.range(today));
    events
        .iter()
        .filter(|event| event.category.as_deref() == Some(DROP_IN_CATEGORY))
        .filter(|event| match &filter.city {
            Some(city) => event
                .city
                .as_deref()
                .map(|value| value.contains(city.as_str()))
                .unwrap_or(false),
            None => true,
        })
        .filter(|event| filter.status.map(|status| event.status == status).unwrap_or(true))
        .filter(|event| match range {
            Some((start, end)) => event
                .event_date
                .map(|date| date >= start && date <= end)
                .unwrap_or(false),
            None => true,
        })
        .cloned()
        .collect()
}
