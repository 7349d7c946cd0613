//! JSON recordings: an array of events.

use anyhow::{Context, Result};

use crate::timeline::{Event, Timeline};

pub fn parse(content: &str) -> Result<Timeline> {
    let events: Vec<Event> =
        serde_json::from_str(content).context("Failed to parse JSON event array")?;
    Ok(Timeline::new(events))
}
