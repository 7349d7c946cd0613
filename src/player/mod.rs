//! Playback engine.
//!
//! Drives a loaded timeline against an editor surface:
//!
//! - `scheduler`: the play/pause/seek/rate state machine
//! - `state`: player states, the playback clock and scheduler notifications
//! - `surface`: the editor surface contract and the in-memory `EditorView`
//! - `timers`: the cooperative timer queue with generation-based cancellation
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use creplay::player::{EditorSurface, EditorView, PlaybackScheduler, SchedulerConfig};
//! use creplay::timeline::{Event, Timeline};
//!
//! let timeline = Timeline::new(vec![
//!     Event::new(1, "a.js", 0, 1000, "let a;"),
//!     Event::new(2, "a.js", 1000, 2000, "let a = 1;"),
//! ]);
//!
//! let mut scheduler = PlaybackScheduler::new(EditorView::new(), SchedulerConfig::default());
//! scheduler.load(timeline);
//! scheduler.play();
//! scheduler.advance(Duration::from_millis(1500));
//! assert_eq!(scheduler.surface().text(), "let a = 1;");
//! ```

mod error;
mod scheduler;
mod state;
mod surface;
mod timers;

pub use error::{PlaybackError, SurfaceError};
pub use scheduler::PlaybackScheduler;
pub use state::{
    is_valid_rate, step_speed, PlaybackClock, PlaybackNotification, PlayerState, SchedulerConfig,
};
pub use surface::{EditorSurface, EditorView, SurfaceCommand, Tab};
