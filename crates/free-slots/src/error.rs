//! Error types for free-slot computation and event loading.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FreeSlotError {
    /// No events to anchor the scan window.
    #[error("Empty input: at least one event is required")]
    EmptyInput,

    /// An event record is missing `start.dateTime` / `end.dateTime`, or a
    /// timestamp is not ISO-8601 with an offset. `index` is 0-based.
    #[error("Malformed event at index {index}: {reason}")]
    MalformedInput { index: usize, reason: String },

    /// Transport failure or non-success status while fetching events.
    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The document (HTTP body, file or reader contents) is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FreeSlotError>;
