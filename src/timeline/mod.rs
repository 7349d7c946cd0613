//! Recorded events and their clock-based selection.
//!
//! - `event`: the `Event` snapshot type and the ordered `Timeline`
//! - `stream`: `TimedEventStream`, which splits a timeline into the active
//!   snapshot per file and the events still ahead of a clock position

mod event;
mod stream;

pub use event::{Event, Timeline};
pub use stream::{BufferSeed, EventWindow, FileWindow, TimedEventStream};
