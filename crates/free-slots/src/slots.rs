//! Compute per-day free time slots from a list of busy events.
//!
//! Events are sorted by start, then scanned once with a "free-from" cursor.
//! Every gap between the cursor and the next event start becomes a free slot
//! on the cursor's date, bounded by a fixed daily window (07:00:00 until
//! midnight by default). Gaps that cross midnight are split into two slots,
//! and dates inside the scan range that received no slot at all get a
//! full-day slot.
//!
//! The scan's upper bound (the *horizon*) is the end of the event that sorts
//! last, not the latest end across all events. An event that starts earlier
//! but ends later than the last-starting one does not extend the horizon.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{FreeSlotError, Result};
use crate::event::Event;

const fn hms(hour: u32, min: u32, sec: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hour, min, sec) {
        Some(t) => t,
        None => panic!("invalid time of day"),
    }
}

/// Start of the daily availability window.
pub const DAY_START: NaiveTime = hms(7, 0, 0);

/// End-of-day sentinel. `00:00:00` as an `end_time` means midnight at the end
/// of the slot's date, not the start of it.
pub const DAY_END: NaiveTime = hms(0, 0, 0);

/// The daily availability window slots are bounded by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl DayWindow {
    /// 07:00:00 until midnight.
    pub const STANDARD: DayWindow = DayWindow {
        start: DAY_START,
        end: DAY_END,
    };
}

impl Default for DayWindow {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A free interval within one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySlot {
    #[serde(with = "hms_format")]
    pub start_time: NaiveTime,
    #[serde(with = "hms_format")]
    pub end_time: NaiveTime,
}

impl DaySlot {
    pub fn new(start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            start_time,
            end_time,
        }
    }
}

/// A [`DaySlot`] tagged with its date, as emitted by the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatedSlot {
    pub date: NaiveDate,
    pub slot: DaySlot,
}

impl DatedSlot {
    fn new(date: NaiveDate, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            date,
            slot: DaySlot::new(start_time, end_time),
        }
    }
}

/// Free slots grouped by date, ascending. Within a date, slots keep the order
/// the scan emitted them in.
pub type FreeSlots = BTreeMap<NaiveDate, Vec<DaySlot>>;

/// Compute free slots per date using the standard 07:00–midnight window.
///
/// # Errors
/// Returns `FreeSlotError::EmptyInput` if `events` is empty.
pub fn compute_free_slots(events: &[Event]) -> Result<FreeSlots> {
    compute_free_slots_with_window(events, DayWindow::STANDARD)
}

/// Compute free slots per date within an explicit daily window.
pub fn compute_free_slots_with_window(events: &[Event], window: DayWindow) -> Result<FreeSlots> {
    let slots = find_available_slots(events, window)?;
    Ok(group_by_date(slots))
}

/// Run the scan and return every emitted slot in emission order, before
/// grouping. Full-day slots for dates without any other slot come last,
/// ascending by date.
///
/// # Errors
/// Returns `FreeSlotError::EmptyInput` if `events` is empty.
pub fn find_available_slots(events: &[Event], window: DayWindow) -> Result<Vec<DatedSlot>> {
    let mut sorted = events.to_vec();
    sorted.sort_by(chronological);

    let (first_start, horizon) = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => (first.start, last.end),
        _ => return Err(FreeSlotError::EmptyInput),
    };

    log::debug!(
        "scanning {} events from {} to horizon {}",
        sorted.len(),
        first_start,
        horizon
    );

    let mut slots = Vec::new();
    let mut cursor = first_start;

    if horizon > cursor {
        slots.push(DatedSlot::new(
            cursor.date_naive(),
            window.start,
            time_of_day(&cursor),
        ));
    }

    for event in &sorted {
        if event.start > cursor {
            // Ties keep the event start.
            let gap_end = if horizon < event.start {
                horizon
            } else {
                event.start
            };

            let crosses_midnight = gap_end.date_naive() > cursor.date_naive();
            if crosses_midnight {
                slots.push(DatedSlot::new(
                    gap_end.date_naive(),
                    window.start,
                    time_of_day(&gap_end),
                ));
            }

            let end_time = if crosses_midnight {
                window.end
            } else {
                time_of_day(&gap_end)
            };
            slots.push(DatedSlot::new(
                cursor.date_naive(),
                time_of_day(&cursor),
                end_time,
            ));
        }

        if event.end > cursor {
            cursor = event.end;
        }
    }

    slots.push(DatedSlot::new(
        horizon.date_naive(),
        time_of_day(&horizon),
        window.end,
    ));

    let covered: BTreeSet<NaiveDate> = slots.iter().map(|s| s.date).collect();
    let last_date = horizon.date_naive();
    let free_days: Vec<DatedSlot> = first_start
        .date_naive()
        .iter_days()
        .take_while(|date| *date <= last_date)
        .filter(|date| !covered.contains(date))
        .map(|date| DatedSlot::new(date, window.start, window.end))
        .collect();

    log::debug!(
        "emitted {} gap slots and {} full free days",
        slots.len(),
        free_days.len()
    );

    slots.extend(free_days);
    Ok(slots)
}

/// Group emitted slots by date, keeping emission order within each date.
pub fn group_by_date(slots: impl IntoIterator<Item = DatedSlot>) -> FreeSlots {
    let mut grouped = FreeSlots::new();
    for dated in slots {
        grouped.entry(dated.date).or_default().push(dated.slot);
    }
    grouped
}

/// Render free slots as 2-space pretty-printed JSON, dates ascending.
pub fn to_pretty_json(slots: &FreeSlots) -> Result<String> {
    Ok(serde_json::to_string_pretty(slots)?)
}

/// Order by start instant, then end instant, then offsets, so that any
/// permutation of the same events sorts identically.
fn chronological(a: &Event, b: &Event) -> Ordering {
    a.start
        .cmp(&b.start)
        .then_with(|| a.end.cmp(&b.end))
        .then_with(|| offset_secs(&a.start).cmp(&offset_secs(&b.start)))
        .then_with(|| offset_secs(&a.end).cmp(&offset_secs(&b.end)))
}

fn offset_secs(ts: &DateTime<FixedOffset>) -> i32 {
    ts.offset().local_minus_utc()
}

/// Wall-clock time of day in the timestamp's own offset, whole seconds.
fn time_of_day(ts: &DateTime<FixedOffset>) -> NaiveTime {
    let time = ts.time();
    time.with_nanosecond(0).unwrap_or(time)
}

/// `HH:MM:SS` (de)serialization for [`NaiveTime`].
mod hms_format {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M:%S";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(de::Error::custom)
    }
}
