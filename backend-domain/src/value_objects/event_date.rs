// Event date normalization
//
// Stored and transmitted dates are always `YYYY-MM-DD`. Incoming values may
// also be written the way people type them ("Mar 20, 2025", optionally with a
// trailing time) or as full ISO timestamps.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;

pub const EVENT_DATE_FORMAT: &str = "%Y-%m-%d";

const CALENDAR_FORMATS: &[&str] = &["%Y-%m-%d", "%b %d, %Y", "%B %d, %Y", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized event date '{0}'")]
pub struct DateParseError(pub String);

/// A parsed date plus any time-of-day text that trailed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEventDate {
    pub date: NaiveDate,
    pub time: Option<String>,
}

pub fn parse_event_date(raw: &str) -> Result<ParsedEventDate, DateParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DateParseError(raw.to_string()));
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ParsedEventDate {
            date: timestamp.date_naive(),
            time: None,
        });
    }
    if let Some(date) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
    {
        return Ok(ParsedEventDate {
            date: date.date(),
            time: None,
        });
    }
    if let Some(date) = parse_calendar_date(trimmed) {
        return Ok(ParsedEventDate { date, time: None });
    }

    // "Mar 20, 2025, 7:00 PM": the date owns the first comma, the time follows the second.
    let mut parts = trimmed.splitn(3, ',');
    if let (Some(month_day), Some(year)) = (parts.next(), parts.next()) {
        if let Some(date) = parse_calendar_date(&format!("{},{}", month_day, year)) {
            let time = parts
                .next()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(ToString::to_string);
            return Ok(ParsedEventDate { date, time });
        }
    }
    Err(DateParseError(raw.to_string()))
}

fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    CALENDAR_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// Serde adapter for `Option<NaiveDate>` fields: writes `YYYY-MM-DD`, reads any
/// accepted representation and treats unparseable text as absent, with a
/// warning.
pub mod optional_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};
    use tracing::warn;

    use super::{parse_event_date, EVENT_DATE_FORMAT};

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format(EVENT_DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.and_then(|value| match parse_event_date(&value) {
            Ok(parsed) => Some(parsed.date),
            Err(err) => {
                // The text is not kept; the next save writes the event undated.
                warn!("dropping stored event date: {}", err);
                None
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn parses_iso_and_human_dates_to_the_same_day() {
        assert_eq!(parse_event_date("2025-03-20").expect("iso").date, ymd(2025, 3, 20));
        assert_eq!(parse_event_date("Mar 20, 2025").expect("short").date, ymd(2025, 3, 20));
        assert_eq!(parse_event_date("March 20, 2025").expect("long").date, ymd(2025, 3, 20));
        assert_eq!(
            parse_event_date("2025-03-20T18:30:00.000Z").expect("rfc3339").date,
            ymd(2025, 3, 20)
        );
    }

    #[test]
    fn splits_trailing_time_from_human_dates() {
        let parsed = parse_event_date("Mar 20, 2025, 7:00 PM").expect("date with time");
        assert_eq!(parsed.date, ymd(2025, 3, 20));
        assert_eq!(parsed.time.as_deref(), Some("7:00 PM"));
    }

    #[derive(serde::Deserialize)]
    struct Dated {
        #[serde(default, with = "optional_date")]
        date: Option<NaiveDate>,
    }

    #[test]
    fn unreadable_stored_dates_load_as_absent() {
        let dated: Dated = serde_json::from_str(r#"{"date": "No date"}"#).expect("decode");
        assert_eq!(dated.date, None);
        let dated: Dated = serde_json::from_str(r#"{"date": "Mar 20, 2025"}"#).expect("decode");
        assert_eq!(dated.date, Some(ymd(2025, 3, 20)));
        let dated: Dated = serde_json::from_str(r#"{"date": null}"#).expect("decode");
        assert_eq!(dated.date, None);
    }

    #[test]
    fn rejects_free_text() {
        assert!(parse_event_date("next tuesday").is_err());
        assert!(parse_event_date("   ").is_err());
    }
}
