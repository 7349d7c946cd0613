//! Recorded events and the timeline that orders them.

use serde::{Deserialize, Serialize};

/// One timestamped full-text snapshot of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Order of occurrence in the recording
    pub sequence: u64,
    /// Logical file the snapshot belongs to
    pub file: String,
    /// Milliseconds from recording start at which the snapshot appears
    pub start_time: u64,
    /// Exclusive end of the snapshot's validity window
    pub end_time: u64,
    /// Full content of `file` as of `start_time`
    pub text: String,
    /// Syntax highlighting tag
    #[serde(default)]
    pub language: String,
}

impl Event {
    pub fn new(
        sequence: u64,
        file: impl Into<String>,
        start_time: u64,
        end_time: u64,
        text: impl Into<String>,
    ) -> Self {
        Self {
            sequence,
            file: file.into(),
            start_time,
            end_time,
            text: text.into(),
            language: String::new(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// True when `clock_ms` falls inside `[start_time, end_time)`.
    pub fn is_active_at(&self, clock_ms: u64) -> bool {
        self.start_time <= clock_ms && clock_ms < self.end_time
    }
}

/// All events of a recording, ordered by start time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    events: Vec<Event>,
}

impl Timeline {
    /// Build a timeline. Events are stably sorted by start time, which leaves
    /// an already ordered recording untouched.
    pub fn new(mut events: Vec<Event>) -> Self {
        events.sort_by_key(|e| e.start_time);
        Self { events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Length of the recording in milliseconds.
    pub fn duration(&self) -> u64 {
        self.events
            .iter()
            .map(|e| e.end_time.max(e.start_time))
            .max()
            .unwrap_or(0)
    }

    /// Distinct files in order of first appearance.
    pub fn files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = Vec::new();
        for event in &self.events {
            if !files.contains(&event.file.as_str()) {
                files.push(&event.file);
            }
        }
        files
    }

    /// Language of the first event recorded for `file`.
    pub fn language_of(&self, file: &str) -> Option<&str> {
        self.events
            .iter()
            .find(|e| e.file == file)
            .map(|e| e.language.as_str())
    }

    /// Number of events recorded for `file`.
    pub fn event_count(&self, file: &str) -> usize {
        self.events.iter().filter(|e| e.file == file).count()
    }
}

impl From<Vec<Event>> for Timeline {
    fn from(events: Vec<Event>) -> Self {
        Self::new(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Timeline {
        Timeline::new(vec![
            Event::new(2, "b.css", 500, 1500, "body {}").with_language("css"),
            Event::new(1, "a.js", 0, 1000, "let a;").with_language("js"),
            Event::new(3, "a.js", 1000, 2000, "let a = 1;").with_language("js"),
        ])
    }

    #[test]
    fn events_are_sorted_by_start_time() {
        let timeline = sample();
        let starts: Vec<u64> = timeline.events().iter().map(|e| e.start_time).collect();
        assert_eq!(starts, vec![0, 500, 1000]);
    }

    #[test]
    fn sort_is_stable_for_equal_start_times() {
        let timeline = Timeline::new(vec![
            Event::new(1, "x", 100, 200, "first"),
            Event::new(2, "y", 100, 200, "second"),
        ]);
        assert_eq!(timeline.events()[0].text, "first");
        assert_eq!(timeline.events()[1].text, "second");
    }

    #[test]
    fn duration_is_latest_end_time() {
        assert_eq!(sample().duration(), 2000);
        assert_eq!(Timeline::default().duration(), 0);
    }

    #[test]
    fn terminal_event_may_end_at_its_start() {
        let timeline = Timeline::new(vec![
            Event::new(1, "a", 0, 900, "x"),
            Event::new(2, "a", 900, 900, "xy"),
        ]);
        assert_eq!(timeline.duration(), 900);
        assert!(!timeline.events()[1].is_active_at(900));
    }

    #[test]
    fn files_in_first_appearance_order() {
        assert_eq!(sample().files(), vec!["a.js", "b.css"]);
    }

    #[test]
    fn language_and_counts_per_file() {
        let timeline = sample();
        assert_eq!(timeline.language_of("b.css"), Some("css"));
        assert_eq!(timeline.language_of("missing"), None);
        assert_eq!(timeline.event_count("a.js"), 2);
    }

    #[test]
    fn active_window_is_half_open() {
        let event = Event::new(1, "a", 100, 200, "");
        assert!(!event.is_active_at(99));
        assert!(event.is_active_at(100));
        assert!(event.is_active_at(199));
        assert!(!event.is_active_at(200));
    }

    #[test]
    fn serde_uses_camel_case_fields() {
        let json = r#"[{"sequence":1,"file":"a.js","startTime":0,"endTime":10,"text":"x"}]"#;
        let timeline: Timeline = serde_json::from_str(json).unwrap();
        assert_eq!(timeline.events()[0].end_time, 10);
        assert_eq!(timeline.events()[0].language, "");

        let back = serde_json::to_string(&timeline).unwrap();
        assert!(back.contains("\"startTime\":0"));
    }
}
