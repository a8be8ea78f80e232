// Seed import
// Reads scraped drop-in session exports (a JSON array) and turns them into
// creation payloads. Anything missing falls back to the built-in samples.

use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use tokio::fs;
use tracing::{debug, info, warn};

use backend_domain::{
    parse_event_date, sample_events, EventStatus, NewEvent, SeedSource, DEFAULT_MAX_PARTICIPANTS,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionRecord {
    #[serde(alias = "eventID", alias = "id")]
    pub event_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub event_date: Option<String>,
    pub event_time: Option<String>,
    pub fee: Option<String>,
    pub openings: Option<Value>,
    pub status: Option<String>,
    pub ages: Option<String>,
    pub event_link: Option<String>,
    pub venue_type: Option<String>,
    pub max_participants: Option<u32>,
    pub current_participants: Option<u32>,
}

impl SessionRecord {
    pub fn into_new_event(self) -> NewEvent {
        let level = self.level.or_else(|| Some(level_from_title(&self.title).to_string()));
        let venue_type = self
            .venue_type
            .or_else(|| self.location.as_deref().map(|loc| venue_type_from_location(loc).to_string()));
        let status = self
            .status
            .as_deref()
            .and_then(EventStatus::parse)
            .or_else(|| self.openings.as_ref().map(status_from_openings));

        // Scrapers write placeholders such as "No date"; keep the session, undated.
        let event_date = self.event_date.filter(|raw| match parse_event_date(raw) {
            Ok(_) => true,
            Err(err) => {
                debug!(title = %self.title, "importing session without a date: {}", err);
                false
            }
        });

        let mut max_participants = self.max_participants;
        let mut current_participants = self.current_participants;
        if status == Some(EventStatus::Full) && current_participants.is_none() {
            let max = max_participants.unwrap_or(DEFAULT_MAX_PARTICIPANTS);
            max_participants = Some(max);
            current_participants = Some(max);
        }

        NewEvent {
            id: self.event_id,
            title: self.title,
            description: self.description,
            category: self.category,
            level,
            location: self.location,
            city: self.city,
            event_date,
            event_time: self.event_time,
            status,
            max_participants,
            current_participants,
            fee: self.fee,
            ages: self.ages,
            event_link: self.event_link,
            venue_type,
            ..NewEvent::default()
        }
    }
}

pub fn level_from_title(title: &str) -> &'static str {
    let lower = title.to_lowercase();
    if lower.contains("beginner") {
        "Beginner"
    } else if lower.contains("intermediate") {
        "Intermediate"
    } else if lower.contains("advanced") {
        "Advanced"
    } else {
        "All Levels"
    }
}

pub fn venue_type_from_location(location: &str) -> &'static str {
    let lower = location.to_lowercase();
    if ["centre", "complex", "gymnasium", "gym"]
        .iter()
        .any(|word| lower.contains(word))
    {
        "Indoor"
    } else if ["beach", "sand", "banks"].iter().any(|word| lower.contains(word)) {
        "Beach"
    } else if lower.contains("grass") {
        "Grass"
    } else {
        "Not Specified"
    }
}

pub fn status_from_openings(openings: &Value) -> EventStatus {
    let text = match openings {
        Value::String(text) => text.trim().to_lowercase(),
        other => other.to_string(),
    };
    if text == "0" || text.contains("full") {
        EventStatus::Full
    } else {
        EventStatus::Open
    }
}

pub async fn read_session_file(path: &std::path::Path) -> anyhow::Result<Vec<NewEvent>> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("reading seed file {}", path.display()))?;
    let records: Vec<SessionRecord> = serde_json::from_str(&content)
        .with_context(|| format!("decoding seed file {}", path.display()))?;
    Ok(records.into_iter().map(SessionRecord::into_new_event).collect())
}

/// Seeds from a session export when one is configured and readable,
/// otherwise from the built-in samples.
pub struct SeedFileSource {
    path: Option<PathBuf>,
}

impl SeedFileSource {
    pub fn new(path: Option<impl Into<PathBuf>>) -> Self {
        Self {
            path: path.map(Into::into),
        }
    }

    pub fn builtin() -> Self {
        Self { path: None }
    }
}

#[async_trait]
impl SeedSource for SeedFileSource {
    async fn load_seed(&self, today: NaiveDate) -> anyhow::Result<Vec<NewEvent>> {
        let Some(path) = &self.path else {
            return Ok(sample_events(today));
        };
        if !path.exists() {
            warn!(path = %path.display(), "seed file not found, using built-in samples");
            return Ok(sample_events(today));
        }
        match read_session_file(path).await {
            Ok(events) => {
                info!(count = events.len(), path = %path.display(), "loaded seed sessions");
                Ok(events)
            }
            Err(err) => {
                warn!("{:#}, using built-in samples", err);
                Ok(sample_events(today))
            }
        }
    }
}
