//! Calendar events: the wire shape and the parsed, offset-aware form.
//!
//! Input records follow the Google Calendar event layout, where each bound is
//! a nested object carrying a `dateTime` string:
//!
//! ```json
//! {"start": {"dateTime": "2024-01-15T09:00:00+00:00"},
//!  "end":   {"dateTime": "2024-01-15T10:00:00+00:00"}}
//! ```
//!
//! Only timed events are accepted. All-day records (`start.date`) and anything
//! else without a `dateTime` are rejected rather than skipped.

use crate::error::{FreeSlotError, Result};
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use serde_json::Value;

/// A busy interval with timezone-aware bounds.
///
/// Each bound keeps the UTC offset it was written with. Ordering comparisons
/// use the absolute instant; dates and times of day are read in the bound's
/// own offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl Event {
    /// Parse an event from two ISO-8601 strings with offsets.
    ///
    /// # Errors
    /// Returns `FreeSlotError::MalformedInput` if either string does not
    /// parse. There is no record list here, so `index` is always 0 and only
    /// `reason` (which names `start` or `end`) is meaningful.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: parse_timestamp(start, 0, "start")?,
            end: parse_timestamp(end, 0, "end")?,
        })
    }
}

/// Raw event record as it arrives over the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEvent {
    #[serde(default)]
    pub start: Option<RawMoment>,
    #[serde(default)]
    pub end: Option<RawMoment>,
}

/// One bound of a [`RawEvent`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMoment {
    #[serde(default)]
    pub date_time: Option<String>,
}

/// Convert a raw record into an [`Event`]. `index` is only used for error
/// reporting.
pub fn parse_event(raw: &RawEvent, index: usize) -> Result<Event> {
    let start = moment_str(raw.start.as_ref(), index, "start")?;
    let end = moment_str(raw.end.as_ref(), index, "end")?;

    Ok(Event {
        start: parse_timestamp(start, index, "start")?,
        end: parse_timestamp(end, index, "end")?,
    })
}

/// Parse a JSON document of event records.
///
/// The document is either an array of records or an object whose `items`
/// field holds that array (the `events.list` response shape). A single bad
/// record fails the whole call.
pub fn parse_events(doc: &Value) -> Result<Vec<Event>> {
    let records = match doc {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("items") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(FreeSlotError::MalformedInput {
                    index: 0,
                    reason: "expected an array of events or an object with an `items` array"
                        .to_string(),
                })
            }
        },
        other => {
            return Err(FreeSlotError::MalformedInput {
                index: 0,
                reason: format!("expected an array of events, got {}", json_kind(other)),
            })
        }
    };

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            if !record.is_object() {
                return Err(FreeSlotError::MalformedInput {
                    index,
                    reason: format!("expected an event object, got {}", json_kind(record)),
                });
            }
            let raw: RawEvent = RawEvent::deserialize(record).map_err(|e| {
                FreeSlotError::MalformedInput {
                    index,
                    reason: e.to_string(),
                }
            })?;
            parse_event(&raw, index)
        })
        .collect()
}

fn moment_str<'a>(moment: Option<&'a RawMoment>, index: usize, field: &str) -> Result<&'a str> {
    moment
        .and_then(|m| m.date_time.as_deref())
        .ok_or_else(|| FreeSlotError::MalformedInput {
            index,
            reason: format!("missing `{}.dateTime`", field),
        })
}

fn parse_timestamp(s: &str, index: usize, field: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s.trim()).map_err(|e| FreeSlotError::MalformedInput {
        index,
        reason: format!("invalid `{}.dateTime` {:?}: {}", field, s, e),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
