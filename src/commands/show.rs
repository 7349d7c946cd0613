//! Print recorded buffers at a point in time

use std::path::Path;

use anyhow::{bail, Result};

use creplay::player::{EditorView, PlaybackScheduler};
use creplay::recording;
use creplay::tui::current_theme;
use creplay::Config;

pub fn handle(path: &Path, at: Option<u64>, file: Option<&str>, config: &Config) -> Result<()> {
    let timeline = recording::load(path)?;
    let mut config = config.scheduler_config();
    // Buffers are printed per file; the displayed file does not matter
    config.follow_events = false;

    let mut scheduler = PlaybackScheduler::new(EditorView::new(), config);
    scheduler.load(timeline);
    let target = at.unwrap_or_else(|| scheduler.duration());
    scheduler.seek(target);

    if let Some(file) = file {
        let Some(text) = scheduler.buffer_text(file) else {
            bail!(
                "No file named '{}' in {} (files: {})",
                file,
                path.display(),
                scheduler.files().join(", ")
            );
        };
        print!("{}", text);
        if !text.is_empty() && !text.ends_with('\n') {
            println!();
        }
        return Ok(());
    }

    let theme = current_theme();
    let files: Vec<String> = scheduler.files().iter().map(|f| f.to_string()).collect();
    for (i, file) in files.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let language = scheduler.buffer_language(file).unwrap_or_default();
        let header = if language.is_empty() {
            format!("==> {} <==", file)
        } else {
            format!("==> {} ({}) <==", file, language)
        };
        println!("{}", theme.accent_text(&header));
        let text = scheduler.buffer_text(file).unwrap_or_default();
        print!("{}", text);
        if !text.is_empty() && !text.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}
