//! Player application state.

use crate::config::PlayerConfig;
use crate::player::{step_speed, EditorView, PlaybackScheduler};
use crate::tui::render::progress::collect_markers;

/// Everything the player UI reads and mutates between frames.
pub struct PlayerApp {
    pub scheduler: PlaybackScheduler<EditorView>,
    /// Shown in the status bar
    pub title: String,
    pub speeds: Vec<f64>,
    pub seek_step_ms: u64,
    pub show_help: bool,
    /// One-shot status message (speed changes, rejected input)
    pub message: Option<String>,
    /// First editor line on screen (0-based)
    pub scroll: usize,
    /// File-switch points drawn on the progress bar
    pub markers: Vec<u64>,
}

impl PlayerApp {
    pub fn new(
        scheduler: PlaybackScheduler<EditorView>,
        title: impl Into<String>,
        config: &PlayerConfig,
    ) -> Self {
        let markers = collect_markers(scheduler.timeline());
        Self {
            scheduler,
            title: title.into(),
            speeds: config.speeds.clone(),
            seek_step_ms: config.seek_step_ms,
            show_help: false,
            message: None,
            scroll: 0,
            markers,
        }
    }

    /// Step to the next configured speed. Returns false at either end.
    pub fn change_speed(&mut self, faster: bool) -> bool {
        let Some(speed) = step_speed(self.scheduler.rate(), &self.speeds, faster) else {
            return false;
        };
        match self.scheduler.set_rate(speed) {
            Ok(()) => {
                self.message = Some(format!("Speed {}x", format_speed(speed)));
                true
            }
            Err(e) => {
                self.message = Some(e.to_string());
                false
            }
        }
    }

    /// Display the file at `index` among the recording's files.
    pub fn select_file_index(&mut self, index: usize) {
        let Some(file) = self.scheduler.files().get(index).map(|f| f.to_string()) else {
            return;
        };
        if let Err(e) = self.scheduler.select_file(&file) {
            self.message = Some(e.to_string());
        }
    }

    /// Display the next (or previous) file, wrapping around.
    pub fn cycle_file(&mut self, forward: bool) {
        let files = self.scheduler.files();
        if files.is_empty() {
            return;
        }
        let current = self
            .scheduler
            .displayed_file()
            .and_then(|d| files.iter().position(|f| *f == d))
            .unwrap_or(0);
        let count = files.len();
        let next = if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        };
        self.select_file_index(next);
    }

    pub fn toggle_follow(&mut self) {
        let follow = !self.scheduler.follow_events();
        self.scheduler.set_follow_events(follow);
        self.message = Some(format!("Follow recording: {}", if follow { "on" } else { "off" }));
    }

    pub fn displayed_index(&self) -> Option<usize> {
        let displayed = self.scheduler.displayed_file()?;
        self.scheduler.files().iter().position(|f| *f == displayed)
    }
}

/// Format a speed without trailing zeros: 1, 1.25, 0.5.
pub fn format_speed(speed: f64) -> String {
    let text = format!("{:.2}", speed);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
