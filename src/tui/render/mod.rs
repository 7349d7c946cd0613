//! Frame layout for the player.
//!
//! - `editor`: buffer pane with line numbers
//! - `progress`: progress bar with file-switch markers
//! - `status`: tab bar, status bar and keybinding footer
//! - `help`: shortcut overlay

pub mod editor;
pub mod help;
pub mod progress;
pub mod status;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::tui::app::PlayerApp;
use crate::tui::theme::current_theme;

/// Footer hints shown under the status bar.
pub const FOOTER_KEYS: &[(&str, &str)] = &[
    ("space", "play/pause"),
    ("<-/->", "seek"),
    ("+/-", "speed"),
    ("tab", "file"),
    ("?", "help"),
    ("q", "quit"),
];

/// Draw one frame of the player.
pub fn draw(frame: &mut Frame, app: &mut PlayerApp) {
    let theme = current_theme();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Min(1),    // editor
            Constraint::Length(1), // progress
            Constraint::Length(1), // status
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    status::render_tabs(frame, chunks[0], app, &theme);

    let text = app
        .scheduler
        .displayed_file()
        .and_then(|file| app.scheduler.buffer_text(file))
        .unwrap_or_default()
        .to_string();
    let cursor_line = app.scheduler.surface().cursor_line();
    app.scroll = editor::render_editor(frame, chunks[1], &text, cursor_line, app.scroll, &theme);

    progress::render_progress(
        frame,
        chunks[2],
        app.scheduler.current_time(),
        app.scheduler.duration(),
        &app.markers,
        &theme,
    );
    status::render_status_bar(frame, chunks[3], app, &theme);
    status::render_footer(frame, chunks[4], FOOTER_KEYS, &theme);

    if app.show_help {
        help::render_help(frame, frame.area(), &theme);
    }
}
