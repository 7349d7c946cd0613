//! Error types for scheduler operations.

use thiserror::Error;

use crate::range::RangeError;

/// Errors returned by `PlaybackScheduler` operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    #[error("Invalid playback rate {0}: must be a finite number above zero")]
    InvalidRate(f64),

    #[error("File not in recording: {0}")]
    UnknownFile(String),

    #[error("No recording loaded")]
    NoRecording,
}

/// Errors an editor surface reports for a command it cannot carry out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("Edit targets {file} but the surface displays {displayed}")]
    NotDisplayed { file: String, displayed: String },

    #[error(transparent)]
    Range(#[from] RangeError),
}
