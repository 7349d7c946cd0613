//! Subcommand handlers.

pub mod completions;
pub mod config;
pub mod info;
pub mod play;
pub mod show;
