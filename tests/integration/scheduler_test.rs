//! Playing fixture recordings through the scheduler.

use creplay::player::{
    EditorSurface, EditorView, PlaybackNotification, PlaybackScheduler, PlayerState,
    SchedulerConfig,
};
use creplay::recording;

use crate::helpers::{fixture, ms, record_notifications, scheduler, scheduler_with};

const HI: &str = "fn main() {\n    println!(\"hi\");\n}";
const HELLO: &str = "fn main() {\n    println!(\"hello\");\n}";

fn srt_scheduler() -> PlaybackScheduler<EditorView> {
    scheduler(recording::load(&fixture("sample.srt")).unwrap())
}

#[test]
fn plays_recording_to_the_end() {
    let mut player = srt_scheduler();
    assert_eq!(player.displayed_file(), Some("main.rs"));
    assert_eq!(player.surface().text(), "fn main() {}");

    player.play();
    player.advance(ms(1000));
    assert_eq!(player.current_time(), 1000);
    assert_eq!(player.surface().text(), HI);

    player.advance(ms(1600));
    assert_eq!(player.displayed_file(), Some("README.md"));
    assert_eq!(player.surface().text(), "# Demo");

    player.advance(ms(3000));
    assert_eq!(player.state(), PlayerState::Ended);
    assert_eq!(player.current_time(), 5000);
    assert_eq!(player.displayed_file(), Some("main.rs"));
    assert_eq!(player.surface().text(), HELLO);
    assert_eq!(player.armed_timers(), 0);
}

#[test]
fn double_speed_halves_wall_time() {
    let mut player = srt_scheduler();
    player.set_rate(2.0).unwrap();
    player.play();
    player.advance(ms(1250));
    assert_eq!(player.current_time(), 2500);
    assert_eq!(player.displayed_file(), Some("README.md"));
}

#[test]
fn seeking_rebuilds_every_buffer() {
    let mut player = srt_scheduler();
    player.seek(4500);
    assert_eq!(player.buffer_text("main.rs"), Some(HELLO));
    assert_eq!(player.buffer_text("README.md"), Some("# Demo"));

    player.seek(500);
    assert_eq!(player.buffer_text("main.rs"), Some("fn main() {}"));
    assert_eq!(player.buffer_text("README.md"), Some(""));
    assert_eq!(player.displayed_file(), Some("main.rs"));
    assert_eq!(player.state(), PlayerState::Paused);
}

#[test]
fn seeking_while_playing_resumes_from_target() {
    let mut player = srt_scheduler();
    player.play();
    player.advance(ms(300));
    player.seek(3900);
    assert_eq!(player.displayed_file(), Some("README.md"));

    player.advance(ms(100));
    assert_eq!(player.displayed_file(), Some("main.rs"));
    assert_eq!(player.surface().text(), HELLO);
    assert!(player.state().is_playing());
}

#[test]
fn events_apply_once_in_order() {
    let mut player = srt_scheduler();
    let seen = record_notifications(&mut player);
    player.play();
    player.advance(ms(6000));

    let applied: Vec<u64> = seen
        .borrow()
        .iter()
        .filter_map(|n| match n {
            PlaybackNotification::EventApplied { sequence, .. } => Some(*sequence),
            _ => None,
        })
        .collect();
    assert_eq!(applied, vec![2, 3, 4]);
    assert!(seen.borrow().contains(&PlaybackNotification::StateChanged {
        from: PlayerState::Playing,
        to: PlayerState::Ended,
    }));
}

#[test]
fn without_follow_the_displayed_file_stays() {
    let config = SchedulerConfig {
        follow_events: false,
        ..SchedulerConfig::default()
    };
    let mut player = scheduler_with(recording::load(&fixture("sample.srt")).unwrap(), config);
    player.play();
    player.advance(ms(3000));
    assert_eq!(player.displayed_file(), Some("main.rs"));
    assert_eq!(player.surface().text(), HI);
    assert_eq!(player.buffer_text("README.md"), Some("# Demo"));
}

#[test]
fn csv_recording_replays_incremental_edits() {
    let mut player = scheduler(recording::load(&fixture("sample.csv")).unwrap());
    player.play();
    player.advance(ms(1000));
    assert_eq!(player.buffer_text("app.js"), Some("let a = 1;"));
    assert_eq!(player.buffer_text("style.css"), Some("body {}"));
    assert_eq!(player.displayed_file(), Some("app.js"));

    player.advance(ms(1000));
    assert_eq!(player.state(), PlayerState::Ended);
    assert_eq!(player.surface().text(), "const a = 1;");
    // One replace per file switch, edits for everything else
    assert_eq!(player.surface().replace_count(), 3);
    assert_eq!(player.surface().edit_count(), 4);
}

#[test]
fn unload_clears_everything() {
    let mut player = srt_scheduler();
    player.play();
    player.advance(ms(1200));
    player.unload();

    assert_eq!(player.state(), PlayerState::Unstarted);
    assert_eq!(player.current_time(), 0);
    assert_eq!(player.duration(), 0);
    assert_eq!(player.armed_timers(), 0);
    assert!(player.files().is_empty());
    assert_eq!(player.displayed_file(), None);
    assert_eq!(player.surface().text(), "");

    // Nothing to play without a recording
    player.play();
    assert_eq!(player.state(), PlayerState::Unstarted);
}
