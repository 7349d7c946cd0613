//! Clock-based partitioning of a timeline.
//!
//! Given a clock value the stream answers two questions: which snapshot each
//! file should show right now, and which events are still ahead. Seeks are
//! user-driven and rare, so every query is a plain linear scan.

use super::event::{Event, Timeline};

/// Events relevant from a clock position onwards, across all files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventWindow<'a> {
    /// At most one event per file whose window contains the clock, in
    /// timeline order
    pub active: Vec<&'a Event>,
    /// Every event starting at or after the clock, in timeline order
    pub upcoming: Vec<&'a Event>,
}

/// Events relevant from a clock position onwards, for a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileWindow<'a> {
    pub active: Option<&'a Event>,
    pub upcoming: Vec<&'a Event>,
}

/// Empty-buffer placeholder for a file, registered before any event fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferSeed {
    pub file: String,
    pub language: String,
}

/// Read-only view of a loaded timeline keyed by clock position.
#[derive(Debug, Clone, Default)]
pub struct TimedEventStream {
    timeline: Timeline,
}

impl TimedEventStream {
    pub fn new(timeline: Timeline) -> Self {
        Self { timeline }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn duration(&self) -> u64 {
        self.timeline.duration()
    }

    pub fn event(&self, index: usize) -> Option<&Event> {
        self.timeline.get(index)
    }

    /// Partition the timeline around `clock_ms`.
    pub fn events_from(&self, clock_ms: u64) -> EventWindow<'_> {
        let mut active: Vec<&Event> = Vec::new();
        let mut upcoming = Vec::new();

        for event in self.timeline.events() {
            if event.is_active_at(clock_ms) && !active.iter().any(|a| a.file == event.file) {
                active.push(event);
            }
            if event.start_time >= clock_ms {
                upcoming.push(event);
            }
        }

        EventWindow { active, upcoming }
    }

    /// Partition the events of one file around `clock_ms`.
    pub fn events_from_file(&self, file: &str, clock_ms: u64) -> FileWindow<'_> {
        let events = self.timeline.events().iter().filter(|e| e.file == file);
        let mut active = None;
        let mut upcoming = Vec::new();

        for event in events {
            if active.is_none() && event.is_active_at(clock_ms) {
                active = Some(event);
            }
            if event.start_time >= clock_ms {
                upcoming.push(event);
            }
        }

        FileWindow { active, upcoming }
    }

    /// Timeline indices of every event starting at or after `clock_ms`.
    pub fn upcoming_indices(&self, clock_ms: u64) -> Vec<usize> {
        self.timeline
            .events()
            .iter()
            .enumerate()
            .filter(|(_, e)| e.start_time >= clock_ms)
            .map(|(i, _)| i)
            .collect()
    }

    /// One empty placeholder per distinct file, in first-appearance order,
    /// independent of the clock.
    pub fn initial_buffers(&self) -> Vec<BufferSeed> {
        self.timeline
            .files()
            .into_iter()
            .map(|file| BufferSeed {
                file: file.to_string(),
                language: self
                    .timeline
                    .language_of(file)
                    .unwrap_or_default()
                    .to_string(),
            })
            .collect()
    }

    /// The snapshot `file` shows at `clock_ms`.
    ///
    /// This is the active event when there is one. When the clock sits in a
    /// gap between events, or past the file's last event, the most recent
    /// event started at or before the clock still describes the buffer.
    /// `None` means the file has not been touched yet.
    pub fn snapshot_at(&self, file: &str, clock_ms: u64) -> Option<&Event> {
        let mut latest = None;
        for event in self.timeline.events().iter().filter(|e| e.file == file) {
            if event.is_active_at(clock_ms) {
                return Some(event);
            }
            if event.start_time <= clock_ms {
                latest = Some(event);
            }
        }
        latest
    }

    /// File of the most recent event started at or before `clock_ms`.
    pub fn focus_at(&self, clock_ms: u64) -> Option<&str> {
        self.timeline
            .events()
            .iter()
            .take_while(|e| e.start_time <= clock_ms)
            .last()
            .map(|e| e.file.as_str())
    }
}
