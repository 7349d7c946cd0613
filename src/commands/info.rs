//! Recording summary handler

use std::path::Path;

use anyhow::Result;

use creplay::recording::{self, RecordingFormat};
use creplay::tui::current_theme;
use creplay::tui::render::progress::{collect_markers, format_duration_precise};

pub fn handle(path: &Path) -> Result<()> {
    let format = RecordingFormat::from_path(path)?;
    let timeline = recording::load(path)?;
    let theme = current_theme();

    println!(
        "{} {}",
        theme.secondary_text("Recording:"),
        theme.primary_text(&path.display().to_string())
    );
    println!(
        "{} {}",
        theme.secondary_text("Format:   "),
        theme.primary_text(&format.to_string())
    );
    println!(
        "{} {}",
        theme.secondary_text("Duration: "),
        theme.primary_text(&format_duration_precise(timeline.duration()))
    );
    println!(
        "{} {}",
        theme.secondary_text("Events:   "),
        theme.primary_text(&timeline.len().to_string())
    );
    println!(
        "{} {}",
        theme.secondary_text("Switches: "),
        theme.primary_text(&collect_markers(&timeline).len().to_string())
    );

    let files = timeline.files();
    if files.is_empty() {
        return Ok(());
    }
    println!();
    println!("{}", theme.accent_text(&format!("Files ({}):", files.len())));
    for file in files {
        let language = timeline.language_of(file).unwrap_or_default();
        let language = if language.is_empty() { "-" } else { language };
        println!(
            "  {} {} {}",
            theme.primary_text(file),
            theme.secondary_text(&format!("[{}]", language)),
            theme.secondary_text(&format!("{} events", timeline.event_count(file)))
        );
    }
    Ok(())
}
