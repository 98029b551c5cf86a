//! # free-slots
//!
//! Per-day free time slots from a list of calendar events.
//!
//! Given busy events with timezone-aware start/end timestamps, computes for
//! every date in the events' range the gaps left inside a fixed daily window
//! (07:00:00 until midnight). Days with no events at all come back as one
//! full-day slot.
//!
//! ## Modules
//!
//! - [`event`] — Event records and their parsing from JSON
//! - [`slots`] — The free-slot scan, per-date grouping and JSON rendering
//! - [`source`] — Loading event documents over HTTP, from files or readers
//! - [`error`] — Error types
//!
//! ```
//! use free_slots::{compute_free_slots, Event};
//!
//! let events = vec![Event::parse("2024-01-15T09:00:00+00:00", "2024-01-15T10:00:00+00:00")?];
//! let slots = compute_free_slots(&events)?;
//! let json = free_slots::to_pretty_json(&slots)?;
//! assert!(json.contains("\"2024-01-15\""));
//! # Ok::<(), free_slots::FreeSlotError>(())
//! ```

pub mod error;
pub mod event;
pub mod slots;
pub mod source;

pub use error::FreeSlotError;
pub use event::{parse_events, Event};
pub use slots::{
    compute_free_slots, compute_free_slots_with_window, to_pretty_json, DaySlot, DayWindow,
    FreeSlots, DAY_END, DAY_START,
};
pub use source::{calculate_free_time_slots, EventSource, FileSource, HttpSource};
