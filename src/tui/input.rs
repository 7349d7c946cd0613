//! Keyboard input handling for the player.
//!
//! Keys map to `PlayerAction`s first so the bindings can be tested without a
//! terminal; actions are then applied to the `PlayerApp`.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::PlayerApp;

/// Result of handling an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    TogglePlay,
    SeekBackward,
    SeekForward,
    SeekStart,
    SeekEnd,
    SpeedUp,
    SpeedDown,
    NextFile,
    PrevFile,
    /// Display the n-th file (0-based)
    SelectFile(usize),
    ToggleFollow,
    ToggleHelp,
    Quit,
}

/// Map a key to its action.
pub fn action_for_key(key: KeyEvent) -> Option<PlayerAction> {
    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => PlayerAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => PlayerAction::Quit,
        KeyCode::Char(' ') | KeyCode::Char('k') => PlayerAction::TogglePlay,
        KeyCode::Left | KeyCode::Char(',') | KeyCode::Char('<') => PlayerAction::SeekBackward,
        KeyCode::Right | KeyCode::Char('.') | KeyCode::Char('>') => PlayerAction::SeekForward,
        KeyCode::Home => PlayerAction::SeekStart,
        KeyCode::End => PlayerAction::SeekEnd,
        KeyCode::Char('+') | KeyCode::Char('=') => PlayerAction::SpeedUp,
        KeyCode::Char('-') | KeyCode::Char('_') => PlayerAction::SpeedDown,
        KeyCode::Tab => PlayerAction::NextFile,
        KeyCode::BackTab => PlayerAction::PrevFile,
        KeyCode::Char(c @ '1'..='9') => PlayerAction::SelectFile(c as usize - '1' as usize),
        KeyCode::Char('f') => PlayerAction::ToggleFollow,
        KeyCode::Char('?') => PlayerAction::ToggleHelp,
        _ => return None,
    };
    Some(action)
}

/// Handle a key press.
pub fn handle_key_event(key: KeyEvent, app: &mut PlayerApp) -> InputResult {
    // While help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return InputResult::Continue;
    }

    match action_for_key(key) {
        Some(action) => apply_action(app, action),
        None => InputResult::Continue,
    }
}

/// Bring the scheduler to wall time `elapsed`, then handle `key`.
///
/// Timers armed by the key are measured from `elapsed`.
pub fn handle_frame(app: &mut PlayerApp, elapsed: Duration, key: Option<KeyEvent>) -> InputResult {
    app.scheduler.advance_to(elapsed);
    match key {
        Some(key) => handle_key_event(key, app),
        None => InputResult::Continue,
    }
}

pub fn apply_action(app: &mut PlayerApp, action: PlayerAction) -> InputResult {
    app.message = None;
    let step = app.seek_step_ms as i64;

    match action {
        PlayerAction::Quit => return InputResult::Quit,
        PlayerAction::TogglePlay => app.scheduler.toggle(),
        PlayerAction::SeekBackward => app.scheduler.seek_by(-step),
        PlayerAction::SeekForward => app.scheduler.seek_by(step),
        PlayerAction::SeekStart => app.scheduler.seek(0),
        PlayerAction::SeekEnd => {
            let end = app.scheduler.duration();
            app.scheduler.seek(end);
        }
        PlayerAction::SpeedUp => {
            app.change_speed(true);
        }
        PlayerAction::SpeedDown => {
            app.change_speed(false);
        }
        PlayerAction::NextFile => app.cycle_file(true),
        PlayerAction::PrevFile => app.cycle_file(false),
        PlayerAction::SelectFile(index) => app.select_file_index(index),
        PlayerAction::ToggleFollow => app.toggle_follow(),
        PlayerAction::ToggleHelp => app.show_help = !app.show_help,
    }
    InputResult::Continue
}
