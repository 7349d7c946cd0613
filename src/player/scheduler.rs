//! The playback scheduler.
//!
//! `PlaybackScheduler` owns the clock, the per-file buffer texts, the timer
//! queue and the editor surface. Everything runs on the caller's thread: the
//! host advances wall time with [`advance`](PlaybackScheduler::advance) or
//! [`advance_to`](PlaybackScheduler::advance_to) and every due timer fires
//! synchronously, in deadline order, before the call returns.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::error::{PlaybackError, SurfaceError};
use super::state::{
    is_valid_rate, scale, PlaybackClock, PlaybackNotification, PlayerState, SchedulerConfig,
};
use super::surface::{EditorSurface, SurfaceCommand};
use super::timers::{TimerKind, TimerQueue};
use crate::range::{compute_delta, to_positional};
use crate::timeline::{Event, Timeline, TimedEventStream};

type Observer = Box<dyn FnMut(&PlaybackNotification)>;

/// Stored text of one file of the loaded recording.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FileBuffer {
    file: String,
    language: String,
    text: String,
}

pub struct PlaybackScheduler<S: EditorSurface> {
    config: SchedulerConfig,
    stream: TimedEventStream,
    surface: S,
    clock: PlaybackClock,
    state: PlayerState,
    buffers: Vec<FileBuffer>,
    displayed: Option<String>,
    timers: TimerQueue,
    /// Wall time elapsed since the scheduler was created
    now: Duration,
    /// Wall time the pending tick was armed at
    tick_armed_at: Duration,
    /// Events applied since the last seek or load, by timeline index
    fired: Vec<bool>,
    observers: Vec<Observer>,
}

impl<S: EditorSurface> PlaybackScheduler<S> {
    pub fn new(surface: S, config: SchedulerConfig) -> Self {
        let rate = config.initial_rate;
        Self {
            config,
            stream: TimedEventStream::default(),
            surface,
            clock: PlaybackClock::new(rate),
            state: PlayerState::Unstarted,
            buffers: Vec::new(),
            displayed: None,
            timers: TimerQueue::new(),
            now: Duration::ZERO,
            tick_armed_at: Duration::ZERO,
            fired: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Register an observer for state, time, rate and buffer changes.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&PlaybackNotification) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Replace the current recording.
    ///
    /// Tears down the previous one (every timer cancelled), registers an empty
    /// buffer per file, displays the first file and applies the state at 0.
    /// A recording with a nonzero duration leaves the scheduler `Paused`.
    pub fn load(&mut self, timeline: Timeline) {
        self.teardown();
        self.stream = TimedEventStream::new(timeline);
        self.fired = vec![false; self.stream.timeline().len()];

        for seed in self.stream.initial_buffers() {
            if let Err(e) = self.surface.apply(SurfaceCommand::Register {
                file: &seed.file,
                language: &seed.language,
            }) {
                warn!("Failed to register buffer for {}: {}", seed.file, e);
            }
            self.buffers.push(FileBuffer {
                file: seed.file,
                language: seed.language,
                text: String::new(),
            });
        }

        if let Some(first) = self.buffers.first().map(|b| b.file.clone()) {
            self.display_file(&first);
        }
        self.sync_to_clock();
        if self.is_loaded() {
            self.set_state(PlayerState::Paused);
        }

        info!(
            "Loaded recording: {} events, {} files, {}ms",
            self.stream.timeline().len(),
            self.buffers.len(),
            self.duration()
        );
    }

    /// Drop the current recording.
    pub fn unload(&mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        self.timers.cancel_all();
        self.stream = TimedEventStream::default();
        self.buffers.clear();
        self.displayed = None;
        self.fired.clear();
        if let Err(e) = self.surface.apply(SurfaceCommand::Clear) {
            warn!("Failed to clear editor surface: {}", e);
        }

        let rate_changed = self.clock.rate != self.config.initial_rate;
        self.clock = PlaybackClock::new(self.config.initial_rate);
        self.set_state(PlayerState::Unstarted);
        self.notify(PlaybackNotification::TimeChanged(0));
        if rate_changed {
            self.notify(PlaybackNotification::RateChanged(self.clock.rate));
        }
    }

    pub fn play(&mut self) {
        if !self.is_loaded() || matches!(self.state, PlayerState::Playing | PlayerState::Ended) {
            return;
        }

        self.set_state(PlayerState::Playing);
        self.clock.running = true;
        self.arm_tick();
        self.arm_events();
    }

    pub fn pause(&mut self) {
        if self.state != PlayerState::Playing {
            return;
        }

        self.settle_partial_tick();
        self.timers.cancel_all();
        self.clock.running = false;
        self.set_state(PlayerState::Paused);
    }

    /// Toggle between playing and paused. From `Ended`, restarts at 0.
    pub fn toggle(&mut self) {
        match self.state {
            PlayerState::Playing => self.pause(),
            PlayerState::Ended => {
                self.seek(0);
                self.play();
            }
            PlayerState::Unstarted | PlayerState::Paused => self.play(),
        }
    }

    /// Move the clock to `target_ms`, clamped to the recording.
    ///
    /// Every file's buffer is brought to its state at the target before this
    /// returns. Event timers are re-armed only while playing.
    pub fn seek(&mut self, target_ms: u64) {
        if !self.is_loaded() {
            return;
        }

        let duration = self.duration();
        let target = target_ms.min(duration);
        self.timers.cancel_events();
        self.clock.current_ms = target;
        self.notify(PlaybackNotification::TimeChanged(target));
        self.sync_to_clock();
        debug!("Seek to {}ms", target);

        match self.state {
            PlayerState::Ended if target < duration => self.set_state(PlayerState::Paused),
            PlayerState::Playing if target >= duration => self.finish(),
            PlayerState::Playing => self.arm_events(),
            _ => {}
        }
    }

    /// Seek relative to the current clock.
    pub fn seek_by(&mut self, delta_ms: i64) {
        let target = if delta_ms < 0 {
            self.clock.current_ms.saturating_sub(delta_ms.unsigned_abs())
        } else {
            self.clock.current_ms.saturating_add(delta_ms as u64)
        };
        self.seek(target);
    }

    /// Change the playback rate. Invalid rates are rejected and the previous
    /// rate is kept.
    pub fn set_rate(&mut self, rate: f64) -> Result<(), PlaybackError> {
        if !is_valid_rate(rate) {
            warn!("Rejected playback rate {}", rate);
            return Err(PlaybackError::InvalidRate(rate));
        }
        if rate == self.clock.rate {
            return Ok(());
        }

        if self.state == PlayerState::Playing {
            self.settle_partial_tick();
        }
        self.clock.rate = rate;
        self.notify(PlaybackNotification::RateChanged(rate));
        debug!("Playback rate set to {}", rate);

        if self.state == PlayerState::Playing {
            self.timers.cancel_all();
            self.arm_tick();
            self.arm_events();
        }
        Ok(())
    }

    /// Show `file` on the editor surface.
    pub fn select_file(&mut self, file: &str) -> Result<(), PlaybackError> {
        if self.buffers.is_empty() {
            return Err(PlaybackError::NoRecording);
        }
        if !self.buffers.iter().any(|b| b.file == file) {
            return Err(PlaybackError::UnknownFile(file.to_string()));
        }
        self.display_file(file);
        Ok(())
    }

    pub fn set_follow_events(&mut self, follow: bool) {
        self.config.follow_events = follow;
    }

    /// Advance wall time by `by`, firing every timer that falls due.
    pub fn advance(&mut self, by: Duration) {
        self.advance_to(self.now + by);
    }

    /// Advance wall time to `wall`, measured from the scheduler's creation.
    /// Earlier values are ignored.
    pub fn advance_to(&mut self, wall: Duration) {
        while let Some(timer) = self.timers.pop_due(wall) {
            self.now = self.now.max(timer.due);
            match timer.kind {
                TimerKind::Tick => self.on_tick(),
                TimerKind::Event(index) => {
                    let mut batch = vec![index];
                    batch.extend(self.timers.pop_events_at(timer.due));
                    self.apply_events(batch);
                }
            }
        }
        self.now = self.now.max(wall);
    }

    /// Wall time until the next armed timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers
            .next_due()
            .map(|due| due.saturating_sub(self.now))
    }

    pub fn current_time(&self) -> u64 {
        self.clock.current_ms
    }

    pub fn duration(&self) -> u64 {
        self.stream.duration()
    }

    pub fn rate(&self) -> f64 {
        self.clock.rate
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn follow_events(&self) -> bool {
        self.config.follow_events
    }

    pub fn timeline(&self) -> &Timeline {
        self.stream.timeline()
    }

    pub fn stream(&self) -> &TimedEventStream {
        &self.stream
    }

    /// Number of live timers.
    pub fn armed_timers(&self) -> usize {
        self.timers.len()
    }

    /// Stored text of `file`, whether displayed or not.
    pub fn buffer_text(&self, file: &str) -> Option<&str> {
        self.buffer(file).map(|b| b.text.as_str())
    }

    pub fn buffer_language(&self, file: &str) -> Option<&str> {
        self.buffer(file).map(|b| b.language.as_str())
    }

    pub fn displayed_file(&self) -> Option<&str> {
        self.displayed.as_deref()
    }

    /// Files of the recording in first-appearance order.
    pub fn files(&self) -> Vec<&str> {
        self.buffers.iter().map(|b| b.file.as_str()).collect()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn is_loaded(&self) -> bool {
        self.duration() > 0
    }

    fn buffer(&self, file: &str) -> Option<&FileBuffer> {
        self.buffers.iter().find(|b| b.file == file)
    }

    fn on_tick(&mut self) {
        self.clock.current_ms += self.config.tick_step_ms();
        if self.clock.current_ms >= self.duration() {
            self.finish();
            return;
        }
        self.notify(PlaybackNotification::TimeChanged(self.clock.current_ms));
        self.arm_tick();
    }

    fn finish(&mut self) {
        self.timers.cancel_all();
        self.clock.running = false;
        self.clock.current_ms = self.duration();
        self.notify(PlaybackNotification::TimeChanged(self.clock.current_ms));
        self.sync_to_clock();
        self.set_state(PlayerState::Ended);
    }

    fn arm_tick(&mut self) {
        let interval = scale(self.config.tick_step_ms(), self.clock.rate);
        self.tick_armed_at = self.now;
        self.timers.arm(self.now + interval, TimerKind::Tick);
    }

    /// Credit the clock with the part of the pending tick already elapsed, so
    /// cancelling the tick loses no recording time.
    fn settle_partial_tick(&mut self) {
        if !self.timers.has_tick() {
            return;
        }
        let elapsed = self.now.saturating_sub(self.tick_armed_at);
        let partial = (elapsed.as_micros() as f64 * self.clock.rate / 1000.0).floor() as u64;
        let partial = partial.min(self.config.tick_step_ms().saturating_sub(1));
        if partial == 0 {
            return;
        }
        self.clock.current_ms = (self.clock.current_ms + partial).min(self.duration());
        self.tick_armed_at = self.now;
        self.notify(PlaybackNotification::TimeChanged(self.clock.current_ms));
    }

    fn arm_events(&mut self) {
        let clock = self.clock.current_ms;
        let mut armed = 0;
        for index in self.stream.upcoming_indices(clock) {
            if self.fired.get(index).copied().unwrap_or(true) {
                continue;
            }
            let Some(start) = self.stream.event(index).map(|e| e.start_time) else {
                continue;
            };
            let due = self.now + self.clock.delay_until(start);
            self.timers.arm(due, TimerKind::Event(index));
            armed += 1;
        }
        debug!("Armed {} event timers at {}ms", armed, clock);
    }

    /// Apply events that fell due together.
    ///
    /// Events of the displayed file go first, then the rest in timeline order.
    /// When following the recording, the display ends on the file of the
    /// batch's last event, as a seek to the same time would show.
    fn apply_events(&mut self, mut batch: Vec<usize>) {
        batch.sort_unstable();
        let displayed = self.displayed.clone();
        let is_displayed = |index: &usize| {
            self.stream
                .event(*index)
                .is_some_and(|e| Some(&e.file) == displayed.as_ref())
        };
        let (first, rest): (Vec<usize>, Vec<usize>) =
            batch.iter().copied().partition(|i| is_displayed(i));
        let focus = batch
            .last()
            .and_then(|&i| self.stream.event(i))
            .map(|e| e.file.clone());

        for index in first.into_iter().chain(rest) {
            self.apply_event(index);
        }
        if self.config.follow_events && batch.len() > 1 {
            if let Some(focus) = focus {
                self.display_file(&focus);
            }
        }
    }

    /// Timer callback for one recorded event.
    fn apply_event(&mut self, index: usize) {
        let Some(event) = self.stream.event(index).cloned() else {
            return;
        };
        if let Some(fired) = self.fired.get_mut(index) {
            *fired = true;
        }

        if self.displayed.as_deref() != Some(event.file.as_str()) && self.config.follow_events {
            self.display_file(&event.file);
        }
        self.set_buffer(&event.file, &event.text);
        self.notify_applied(&event);
    }

    /// Bring every buffer to its state at the current clock, displayed file
    /// first.
    fn sync_to_clock(&mut self) {
        let clock = self.clock.current_ms;

        if self.config.follow_events {
            if let Some(focus) = self.stream.focus_at(clock).map(str::to_string) {
                self.display_file(&focus);
            }
        }

        let mut order: Vec<String> = self.buffers.iter().map(|b| b.file.clone()).collect();
        if let Some(pos) = self
            .displayed
            .as_ref()
            .and_then(|d| order.iter().position(|f| f == d))
        {
            let displayed = order.remove(pos);
            order.insert(0, displayed);
        }

        for file in order {
            let target = self
                .stream
                .snapshot_at(&file, clock)
                .map(|e| e.text.clone())
                .unwrap_or_default();
            self.set_buffer(&file, &target);
        }

        for (fired, event) in self.fired.iter_mut().zip(self.stream.timeline().events()) {
            *fired = event.start_time <= clock;
        }
    }

    /// Store `text` for `file` and, when displayed, push the change to the
    /// surface.
    fn set_buffer(&mut self, file: &str, text: &str) {
        if self.displayed.as_deref() == Some(file) {
            self.apply_to_surface(file, text);
        }
        if let Some(buffer) = self.buffers.iter_mut().find(|b| b.file == file) {
            if buffer.text != text {
                buffer.text = text.to_string();
            }
        }
    }

    fn apply_to_surface(&mut self, file: &str, target: &str) {
        let current = self.surface.text().to_string();
        let Some(delta) = compute_delta(&current, target) else {
            return;
        };

        let result = to_positional(&delta, &current).map_err(SurfaceError::from).and_then(|edit| {
            self.surface.apply(SurfaceCommand::Edit { file, edit: &edit })
        });
        match result {
            Ok(()) if self.surface.text() == target => {}
            Ok(()) => {
                warn!("Edit for {} diverged from the recorded text, replacing", file);
                self.replace_surface(file, target);
            }
            Err(e) => {
                warn!("Edit for {} failed ({}), replacing", file, e);
                self.replace_surface(file, target);
            }
        }
    }

    fn replace_surface(&mut self, file: &str, text: &str) {
        if let Err(e) = self.surface.apply(SurfaceCommand::Replace { file, text }) {
            warn!("Failed to replace {}: {}", file, e);
        }
    }

    fn display_file(&mut self, file: &str) {
        if self.displayed.as_deref() == Some(file) {
            return;
        }
        let text = self
            .buffer(file)
            .map(|b| b.text.clone())
            .unwrap_or_default();
        self.displayed = Some(file.to_string());
        self.replace_surface(file, &text);
        debug!("Displaying {}", file);
        self.notify(PlaybackNotification::FileDisplayed(file.to_string()));
    }

    fn set_state(&mut self, to: PlayerState) {
        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        debug!("Playback state {:?} -> {:?}", from, to);
        self.notify(PlaybackNotification::StateChanged { from, to });
    }

    fn notify_applied(&mut self, event: &Event) {
        self.notify(PlaybackNotification::EventApplied {
            file: event.file.clone(),
            sequence: event.sequence,
        });
    }

    fn notify(&mut self, notification: PlaybackNotification) {
        for observer in &mut self.observers {
            observer(&notification);
        }
    }
}
