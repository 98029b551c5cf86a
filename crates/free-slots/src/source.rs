//! Event sources: where the raw event document comes from.
//!
//! The computation itself never does I/O. A source loads a JSON document
//! (from an HTTP endpoint, a file, or any reader), and [`parse_events`] turns
//! it into [`Event`]s. Transport and decoding failures propagate as-is; there
//! is no retry.

use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value;

use crate::error::Result;
use crate::event::{parse_events, Event};
use crate::slots::{compute_free_slots, FreeSlots};

/// Default timeout for [`HttpSource`].
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can supply a JSON document of event records.
pub trait EventSource {
    /// Load the raw JSON document.
    fn load_json(&self) -> Result<Value>;

    /// Load and parse the events. Fails on the first malformed record.
    fn load_events(&self) -> Result<Vec<Event>> {
        let doc = self.load_json()?;
        let events = parse_events(&doc)?;
        log::info!("loaded {} events", events.len());
        Ok(events)
    }
}

/// Fetch events with a blocking HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl EventSource for HttpSource {
    fn load_json(&self) -> Result<Value> {
        log::debug!("GET {}", self.url);
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;

        // Non-2xx is a fetch failure; a 2xx body that is not JSON is a JSON error.
        let body = client.get(&self.url).send()?.error_for_status()?.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Read events from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl EventSource for FileSource {
    fn load_json(&self) -> Result<Value> {
        log::debug!("reading {}", self.path.display());
        let file = File::open(&self.path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

/// Read events from any reader (e.g. stdin). The reader is consumed by the
/// first load; later loads see whatever is left, normally nothing.
pub struct ReaderSource<R> {
    reader: RefCell<R>,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: RefCell::new(reader),
        }
    }
}

impl<R: Read> EventSource for ReaderSource<R> {
    fn load_json(&self) -> Result<Value> {
        let mut buf = String::new();
        self.reader.borrow_mut().read_to_string(&mut buf)?;
        Ok(serde_json::from_str(&buf)?)
    }
}

/// Load events from `source` and compute their free slots.
pub fn calculate_free_time_slots<S: EventSource + ?Sized>(source: &S) -> Result<FreeSlots> {
    let events = source.load_events()?;
    compute_free_slots(&events)
}
