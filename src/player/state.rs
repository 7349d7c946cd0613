//! Player state and playback clock.
//!
//! Contains the `PlayerState` machine states, the scheduler-owned
//! `PlaybackClock`, the scheduler configuration and the notifications the
//! scheduler emits to its observers.

use std::time::Duration;

/// Playback state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    /// No recording with a nonzero duration is loaded
    #[default]
    Unstarted,
    /// Clock stopped, timers disarmed
    Paused,
    /// Clock ticking, upcoming events armed
    Playing,
    /// Clock reached the end of the recording
    Ended,
}

impl PlayerState {
    /// Human-readable label for status bars.
    pub fn label(self) -> &'static str {
        match self {
            Self::Unstarted => "■ Ready",
            Self::Paused => "⏸ Paused",
            Self::Playing => "▶ Playing",
            Self::Ended => "■ Ended",
        }
    }

    pub fn is_playing(self) -> bool {
        self == Self::Playing
    }
}

/// Scheduler-owned notion of recording time.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackClock {
    /// Milliseconds from recording start
    pub current_ms: u64,
    /// Playback speed multiplier (1.0 = real time)
    pub rate: f64,
    /// Whether the recurring tick is armed
    pub running: bool,
}

impl PlaybackClock {
    pub fn new(rate: f64) -> Self {
        Self {
            current_ms: 0,
            rate,
            running: false,
        }
    }

    /// Wall-clock delay until recording time `target_ms` at the current rate.
    ///
    /// Targets in the past fire immediately.
    pub fn delay_until(&self, target_ms: u64) -> Duration {
        scale(target_ms.saturating_sub(self.current_ms), self.rate)
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Convert recording milliseconds into wall time at `rate`.
pub(crate) fn scale(recording_ms: u64, rate: f64) -> Duration {
    let micros = (recording_ms as f64 * 1000.0 / rate).round();
    Duration::from_micros(micros as u64)
}

/// True for finite rates above zero.
pub fn is_valid_rate(rate: f64) -> bool {
    rate.is_finite() && rate > 0.0
}

/// Next speed in `speeds` above (or below) `current`, if any.
///
/// `speeds` need not be sorted; the nearest value in the requested direction
/// wins.
pub fn step_speed(current: f64, speeds: &[f64], faster: bool) -> Option<f64> {
    let candidates = speeds.iter().copied().filter(|&s| is_valid_rate(s));
    if faster {
        candidates
            .filter(|&s| s > current + f64::EPSILON)
            .min_by(|a, b| a.total_cmp(b))
    } else {
        candidates
            .filter(|&s| s < current - f64::EPSILON)
            .max_by(|a, b| a.total_cmp(b))
    }
}

/// Scheduler tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerConfig {
    /// Wall-clock tick interval at rate 1.0; also the logical clock step per
    /// tick
    pub tick_interval: Duration,
    /// Switch the displayed file to whichever file the recording touches
    pub follow_events: bool,
    /// Rate the clock starts at after every load
    pub initial_rate: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(100),
            follow_events: true,
            initial_rate: 1.0,
        }
    }
}

impl SchedulerConfig {
    pub(crate) fn tick_step_ms(&self) -> u64 {
        (self.tick_interval.as_millis() as u64).max(1)
    }
}

/// Change notifications delivered to scheduler observers.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackNotification {
    StateChanged { from: PlayerState, to: PlayerState },
    TimeChanged(u64),
    RateChanged(f64),
    /// The editor surface now shows this file
    FileDisplayed(String),
    /// A recorded event was applied to its file's buffer
    EventApplied { file: String, sequence: u64 },
}
