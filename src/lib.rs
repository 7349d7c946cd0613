//! creplay - replay recorded coding sessions into an editor buffer.
//!
//! A recording is a timeline of full-text snapshots per file. The
//! [`player::PlaybackScheduler`] walks that timeline on a clock and turns
//! consecutive snapshots into minimal positional edits using [`range`].

pub mod cli;
pub mod config;
pub mod logging;
pub mod player;
pub mod range;
pub mod recording;
pub mod timeline;
pub mod tui;

pub use config::Config;
