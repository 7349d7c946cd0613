//! SRT recordings.
//!
//! Each cue carries one snapshot as a JSON payload on its text line:
//!
//! ```text
//! 1
//! 00:00:00,000 --> 00:00:01,500
//! {"text":"let a;","file":"main.js","language":"javascript"}
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::timeline::{Event, Timeline};

#[derive(Debug, Deserialize)]
struct CuePayload {
    text: String,
    file: String,
    #[serde(default)]
    language: String,
}

pub fn parse(content: &str) -> Result<Timeline> {
    let normalized = content.replace("\r\n", "\n");
    let mut events: Vec<Event> = Vec::new();

    for (cue_num, cue) in normalized
        .split("\n\n")
        .filter(|c| !c.trim().is_empty())
        .enumerate()
    {
        parse_cue(cue.trim_matches('\n'), &mut events)
            .with_context(|| format!("Failed to parse cue {}", cue_num + 1))?;
    }

    Ok(Timeline::new(events))
}

fn parse_cue(cue: &str, events: &mut Vec<Event>) -> Result<()> {
    let mut lines = cue.lines();
    let number = lines.next().unwrap_or_default().trim();
    let timing = lines.next().context("Cue has no timing line")?;
    let payload = lines.next().unwrap_or_default().trim();

    let (start, end) = timing
        .split_once("-->")
        .with_context(|| format!("Invalid timing line: {:?}", timing))?;
    let start_time = parse_timestamp(start.trim())?;
    let end_time = parse_timestamp(end.trim())?;

    if payload.is_empty() {
        return Ok(());
    }
    let payload: CuePayload =
        serde_json::from_str(payload).context("Failed to parse cue payload JSON")?;

    if let Some(last) = events.last_mut() {
        if last.file == payload.file && last.text == payload.text {
            last.end_time = end_time;
            return Ok(());
        }
    }

    let sequence = match events.last() {
        Some(last) => last.sequence + 1,
        None => number
            .parse()
            .with_context(|| format!("Invalid cue number: {:?}", number))?,
    };
    events.push(
        Event::new(sequence, payload.file, start_time, end_time, payload.text)
            .with_language(payload.language),
    );
    Ok(())
}

/// Parse an `HH:MM:SS,mmm` timestamp into milliseconds.
pub(crate) fn parse_timestamp(value: &str) -> Result<u64> {
    let (clock, millis) = value.split_once([',', '.']).unwrap_or((value, "0"));
    let parts: Vec<&str> = clock.split(':').collect();
    let [hours, minutes, seconds] = parts[..] else {
        bail!("Invalid timestamp: {:?}", value);
    };

    let field = |s: &str| -> Result<u64> {
        s.trim()
            .parse::<u64>()
            .with_context(|| format!("Invalid timestamp: {:?}", value))
    };
    Ok(field(hours)? * 3_600_000
        + field(minutes)? * 60_000
        + field(seconds)? * 1000
        + field(millis)?)
}
