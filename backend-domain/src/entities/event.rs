// Event entity
// A volleyball session, tournament or meetup and the payloads that create or change one

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value_objects::{optional_date, parse_event_date, DateParseError, EventId, EventStatus};

pub const DEFAULT_MAX_PARTICIPANTS: u32 = 12;

fn default_max_participants() -> u32 {
    DEFAULT_MAX_PARTICIPANTS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(alias = "eventID")]
    pub id: EventId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, with = "optional_date", skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_time: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default = "default_max_participants")]
    pub max_participants: u32,
    #[serde(default)]
    pub current_participants: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ages: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_type: Option<String>,
    #[serde(default)]
    pub attachments: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl Event {
    pub fn is_full(&self) -> bool {
        self.current_participants >= self.max_participants
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error(transparent)]
    InvalidDate(#[from] DateParseError),
    #[error("maxParticipants must be greater than 0")]
    ZeroCapacity,
    #[error("currentParticipants ({current}) exceeds maxParticipants ({max})")]
    OverCapacity { current: u32, max: u32 },
    #[error("status {requested} does not match {current}/{max} participants")]
    StatusMismatch {
        requested: EventStatus,
        current: u32,
        max: u32,
    },
    #[error("a cancelled event cannot be reopened")]
    Cancelled,
}

/// Creation payload. Everything except the title is optional; the store fills
/// in id, `createdAt`, `status = Open` and `currentParticipants = 0` and the
/// caller's values win over those defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewEvent {
    #[serde(alias = "eventID", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_participants: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ages: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl NewEvent {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn into_event(
        self,
        id: EventId,
        created_at: DateTime<Utc>,
    ) -> Result<Event, EventValidationError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(EventValidationError::EmptyTitle);
        }
        let (event_date, parsed_time) = match self.event_date.or(self.due_date) {
            Some(raw) => {
                let parsed = parse_event_date(&raw)?;
                (Some(parsed.date), parsed.time)
            }
            None => (None, None),
        };
        let max_participants = self.max_participants.unwrap_or(DEFAULT_MAX_PARTICIPANTS);
        let current_participants = self.current_participants.unwrap_or(0);
        check_capacity(current_participants, max_participants)?;

        Ok(Event {
            id,
            title,
            description: self.description,
            category: self.category,
            level: self.level,
            location: self.location,
            city: self.city,
            event_date,
            event_time: self.event_time.or(parsed_time),
            created_at,
            status: self.status.unwrap_or_default(),
            max_participants,
            current_participants,
            fee: self.fee,
            ages: self.ages,
            host_name: self.host_name,
            event_link: self.event_link,
            venue_type: self.venue_type,
            attachments: self.attachments.unwrap_or(0),
            priority: self.priority,
            is_public: self.is_public,
        })
    }
}

/// Partial update. Absent fields keep the stored value. Identity, creation
/// time and the participant count are not patchable; the count only moves
/// through join/leave.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ages: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Shallow merge: every field present in the patch replaces the base value.
    pub fn apply_to(&self, base: &Event) -> Result<Event, EventValidationError> {
        let mut merged = base.clone();
        if let Some(title) = &self.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(EventValidationError::EmptyTitle);
            }
            merged.title = title.to_string();
        }
        if let Some(raw) = &self.event_date {
            let parsed = parse_event_date(raw)?;
            merged.event_date = Some(parsed.date);
            if self.event_time.is_none() && parsed.time.is_some() {
                merged.event_time = parsed.time;
            }
        }
        if let Some(max) = self.max_participants {
            check_capacity(merged.current_participants, max)?;
            merged.max_participants = max;
        }
        merged.status = self.merged_status(&merged)?;
        if let Some(attachments) = self.attachments {
            merged.attachments = attachments;
        }
        if let Some(is_public) = self.is_public {
            merged.is_public = Some(is_public);
        }
        merge_text(&mut merged.description, &self.description);
        merge_text(&mut merged.category, &self.category);
        merge_text(&mut merged.level, &self.level);
        merge_text(&mut merged.location, &self.location);
        merge_text(&mut merged.city, &self.city);
        merge_text(&mut merged.event_time, &self.event_time);
        merge_text(&mut merged.fee, &self.fee);
        merge_text(&mut merged.ages, &self.ages);
        merge_text(&mut merged.host_name, &self.host_name);
        merge_text(&mut merged.event_link, &self.event_link);
        merge_text(&mut merged.venue_type, &self.venue_type);
        merge_text(&mut merged.priority, &self.priority);
        Ok(merged)
    }

    /// Status is derived from occupancy. A patch may cancel an event, or name
    /// the status its occupancy already implies; a cancelled event stays
    /// cancelled.
    fn merged_status(&self, merged: &Event) -> Result<EventStatus, EventValidationError> {
        let current = merged.current_participants;
        let max = merged.max_participants;
        let derived = EventStatus::for_occupancy(current, max);
        match self.status {
            Some(EventStatus::Cancelled) => Ok(EventStatus::Cancelled),
            Some(_) if merged.status == EventStatus::Cancelled => {
                Err(EventValidationError::Cancelled)
            }
            Some(requested) if requested != derived => Err(EventValidationError::StatusMismatch {
                requested,
                current,
                max,
            }),
            Some(requested) => Ok(requested),
            None if merged.status == EventStatus::Cancelled => Ok(EventStatus::Cancelled),
            None if self.max_participants.is_some() => Ok(derived),
            None => Ok(merged.status),
        }
    }
}

fn merge_text(target: &mut Option<String>, value: &Option<String>) {
    if let Some(value) = value {
        *target = Some(value.clone());
    }
}

fn check_capacity(current: u32, max: u32) -> Result<(), EventValidationError> {
    if max == 0 {
        return Err(EventValidationError::ZeroCapacity);
    }
    if current > max {
        return Err(EventValidationError::OverCapacity { current, max });
    }
    Ok(())
}
