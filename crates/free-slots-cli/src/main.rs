//! `free-slots` CLI — fetch a calendar's events and print its free time slots.
//!
//! ## Usage
//!
//! ```sh
//! # Fetch events over HTTP
//! free-slots https://example.com/events.json
//!
//! # Read events from a file, write the result to another file
//! free-slots events.json -o free.json
//!
//! # Read events from stdin
//! cat events.json | free-slots
//!
//! # Show what the scan is doing
//! RUST_LOG=debug free-slots events.json
//! ```
//!
//! The output is a pretty-printed JSON object mapping `YYYY-MM-DD` dates to
//! lists of `{"start_time", "end_time"}` slots, where an `end_time` of
//! `00:00:00` means midnight at the end of that date.

use anyhow::{Context, Result};
use clap::Parser;
use free_slots::source::ReaderSource;
use free_slots::{EventSource, FileSource, HttpSource};
use std::io;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "free-slots",
    version,
    about = "Print per-day free time slots (07:00 until midnight) for a list of calendar events"
)]
struct Cli {
    /// Events JSON: an http(s) URL, a file path, or `-` for stdin (the default)
    source: Option<String>,

    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the JSON document.
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    let source = open_source(cli.source.as_deref(), Duration::from_secs(cli.timeout));
    let events = source
        .load_events()
        .with_context(|| format!("Failed to load events from {}", describe(cli.source.as_deref())))?;

    let slots = free_slots::compute_free_slots(&events).context("Failed to compute free slots")?;
    log::info!("computed free slots for {} dates", slots.len());

    let json = free_slots::to_pretty_json(&slots).context("Failed to render free slots")?;
    write_output(cli.output.as_deref(), &json)?;

    Ok(())
}

fn open_source(location: Option<&str>, timeout: Duration) -> Box<dyn EventSource> {
    match location {
        None | Some("-") => Box::new(ReaderSource::new(io::stdin())),
        Some(url) if is_url(url) => Box::new(HttpSource::new(url).with_timeout(timeout)),
        Some(path) => Box::new(FileSource::new(path)),
    }
}

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

fn describe(location: Option<&str>) -> &str {
    match location {
        None | Some("-") => "stdin",
        Some(other) => other,
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
