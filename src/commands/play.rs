//! Interactive player handler

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

use creplay::player::{EditorView, PlaybackScheduler};
use creplay::recording;
use creplay::tui::{self, PlayerApp};
use creplay::Config;

pub fn handle(path: &Path, speed: Option<f64>, at: Option<u64>, config: &Config) -> Result<()> {
    let timeline = recording::load(path)?;
    if timeline.is_empty() {
        bail!("Recording {} contains no events", path.display());
    }

    let mut scheduler = PlaybackScheduler::new(EditorView::new(), config.scheduler_config());
    scheduler.load(timeline);
    if let Some(speed) = speed {
        scheduler
            .set_rate(speed)
            .with_context(|| format!("Invalid --speed {}", speed))?;
    }
    if let Some(at) = at {
        scheduler.seek(at);
    }
    scheduler.play();
    info!(
        "Playing {} from {}ms at {}x",
        path.display(),
        scheduler.current_time(),
        scheduler.rate()
    );

    let title = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mut app = PlayerApp::new(scheduler, title, &config.player);
    tui::run(&mut app)
}
