//! Shared fixtures for integration tests.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use creplay::player::{EditorView, PlaybackNotification, PlaybackScheduler, SchedulerConfig};
use creplay::timeline::Timeline;

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn scheduler(timeline: Timeline) -> PlaybackScheduler<EditorView> {
    scheduler_with(timeline, SchedulerConfig::default())
}

pub fn scheduler_with(timeline: Timeline, config: SchedulerConfig) -> PlaybackScheduler<EditorView> {
    let mut scheduler = PlaybackScheduler::new(EditorView::new(), config);
    scheduler.load(timeline);
    scheduler
}

/// Collect every notification the scheduler emits from now on.
pub fn record_notifications(
    scheduler: &mut PlaybackScheduler<EditorView>,
) -> Rc<RefCell<Vec<PlaybackNotification>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    scheduler.subscribe(move |n: &PlaybackNotification| sink.borrow_mut().push(n.clone()));
    seen
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}
