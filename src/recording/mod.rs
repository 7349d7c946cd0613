//! Recording file parsers.
//!
//! Turns a recorded coding session into a `Timeline`. Three formats are
//! understood, picked by file extension:
//!
//! - `srt`: subtitle cues whose text is a JSON `{text, file, language}` payload
//! - `csv`: keystroke-level change log, reconstructed into full snapshots
//! - `json`: an array of events in the timeline's own shape

mod csv;
mod json;
mod srt;

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::timeline::Timeline;

/// Supported recording formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingFormat {
    Srt,
    Csv,
    Json,
}

impl RecordingFormat {
    pub const ALL: [RecordingFormat; 3] = [Self::Srt, Self::Csv, Self::Json];

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "srt" => Some(Self::Srt),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Detect the format of `path` from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        match Self::from_extension(extension) {
            Some(format) => Ok(format),
            None => bail!(
                "Unsupported recording format: {:?} (expected one of: {})",
                path,
                Self::ALL
                    .iter()
                    .map(|f| f.extension())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for RecordingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_ascii_uppercase())
    }
}

/// Load a recording from disk.
pub fn load(path: &Path) -> Result<Timeline> {
    let format = RecordingFormat::from_path(path)?;
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    let timeline = parse_str(&content, format)
        .with_context(|| format!("Failed to parse {} recording {:?}", format, path))?;

    info!(
        "Parsed {} recording {:?}: {} events",
        format,
        path,
        timeline.len()
    );
    Ok(timeline)
}

/// Parse a recording held in memory.
pub fn parse_str(content: &str, format: RecordingFormat) -> Result<Timeline> {
    let timeline = match format {
        RecordingFormat::Srt => srt::parse(content)?,
        RecordingFormat::Csv => csv::parse(content)?,
        RecordingFormat::Json => json::parse(content)?,
    };
    validate(&timeline)?;
    Ok(timeline)
}

fn validate(timeline: &Timeline) -> Result<()> {
    for event in timeline.events() {
        if event.end_time < event.start_time {
            bail!(
                "Event {} for {} ends at {}ms before it starts at {}ms",
                event.sequence,
                event.file,
                event.end_time,
                event.start_time
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            RecordingFormat::from_extension("SRT"),
            Some(RecordingFormat::Srt)
        );
        assert_eq!(RecordingFormat::from_extension("cast"), None);
    }

    #[test]
    fn unsupported_extension_names_supported_ones() {
        let err = RecordingFormat::from_path(Path::new("session.cast")).unwrap_err();
        assert!(err.to_string().contains("srt, csv, json"));
    }

    #[test]
    fn backwards_windows_are_rejected() {
        let json = r#"[{"sequence":7,"file":"a","startTime":100,"endTime":50,"text":""}]"#;
        let err = parse_str(json, RecordingFormat::Json).unwrap_err();
        assert!(err.to_string().contains("Event 7"));
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(
            &path,
            r#"[{"sequence":1,"file":"a","startTime":0,"endTime":10,"text":"x"}]"#,
        )
        .unwrap();

        let timeline = load(&path).unwrap();
        assert_eq!(timeline.len(), 1);
    }

    #[test]
    fn load_missing_file_fails_with_path() {
        let err = load(Path::new("/nonexistent/session.srt")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/session.srt"));
    }
}
