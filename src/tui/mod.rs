//! Terminal player for recordings.
//!
//! The scheduler is driven from the draw loop: each iteration waits for input
//! no longer than the next armed timer, advances the scheduler to the elapsed
//! wall time and only then applies the key.

pub mod app;
pub mod input;
pub mod render;
pub mod terminal_guard;
pub mod theme;
pub mod ui;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{enable_raw_mode, EnterAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;

pub use app::PlayerApp;
pub use theme::current_theme;
pub use terminal_guard::{install_panic_hook, TerminalGuard};

use input::{handle_frame, InputResult};

/// Upper bound on how long the loop sleeps between redraws.
const MAX_FRAME_WAIT: Duration = Duration::from_millis(50);

/// Run the interactive player until the user quits.
pub fn run(app: &mut PlayerApp) -> Result<()> {
    install_panic_hook();
    enable_raw_mode()?;
    let mut guard = TerminalGuard::new();
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, app);
    guard.cleanup()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut PlayerApp,
) -> Result<()> {
    let start = Instant::now();
    loop {
        terminal.draw(|frame| render::draw(frame, app))?;

        let wait = app
            .scheduler
            .next_deadline()
            .map_or(MAX_FRAME_WAIT, |due| due.min(MAX_FRAME_WAIT));

        let key = if event::poll(wait)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => Some(key),
                _ => None,
            }
        } else {
            None
        };

        if handle_frame(app, start.elapsed(), key) == InputResult::Quit {
            debug!("Player quit at {}ms", app.scheduler.current_time());
            return Ok(());
        }
    }
}
