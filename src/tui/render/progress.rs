//! Progress bar with tab-switch markers.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::timeline::Timeline;
use crate::tui::theme::Theme;

const PLAYHEAD: char = '⏺';
const MARKER: char = '◆';
const TRACK: char = '─';
const FILLED: char = '━';

/// Format milliseconds as MM:SS.
pub fn format_duration(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// Format milliseconds as MM:SS.mmm.
pub fn format_duration_precise(ms: u64) -> String {
    format!("{}.{:03}", format_duration(ms), ms % 1000)
}

/// Start times of events where the recording moves to a different file.
pub fn collect_markers(timeline: &Timeline) -> Vec<u64> {
    let mut markers = Vec::new();
    let mut previous: Option<&str> = None;

    for event in timeline.events() {
        if let Some(prev) = previous {
            if prev != event.file {
                markers.push(event.start_time);
            }
        }
        previous = Some(&event.file);
    }

    markers
}

/// Build the progress bar character array.
///
/// Returns the bar and the number of filled positions.
pub fn build_progress_bar_chars(
    bar_width: usize,
    current_ms: u64,
    total_ms: u64,
    markers: &[u64],
) -> (Vec<char>, usize) {
    let progress = if total_ms > 0 {
        (current_ms as f64 / total_ms as f64).clamp(0.0, 1.0)
    } else {
        1.0
    };

    let filled = (bar_width as f64 * progress) as usize;

    let mut bar: Vec<char> = vec![TRACK; bar_width];

    if filled < bar_width {
        bar[filled] = PLAYHEAD;
    }

    for &marker in markers {
        let marker_pos = if total_ms > 0 {
            ((marker as f64 / total_ms as f64) * bar_width as f64) as usize
        } else {
            0
        };
        if marker_pos < bar_width && bar[marker_pos] != PLAYHEAD {
            bar[marker_pos] = MARKER;
        }
    }

    (bar, filled)
}

/// Progress bar line for a terminal `width` columns wide.
pub fn progress_line(
    width: u16,
    current_ms: u64,
    total_ms: u64,
    markers: &[u64],
    theme: &Theme,
) -> Line<'static> {
    let time_display = format!(
        " {}/{}",
        format_duration(current_ms),
        format_duration(total_ms)
    );
    let bar_width = (width as usize).saturating_sub(time_display.chars().count() + 2);
    let (bar, filled) = build_progress_bar_chars(bar_width, current_ms, total_ms, markers);

    let mut spans = Vec::with_capacity(bar_width + 2);
    spans.push(Span::raw(" "));
    for (i, &c) in bar.iter().enumerate() {
        let span = if c == MARKER {
            Span::styled(c.to_string(), theme.marker_style())
        } else if c == PLAYHEAD {
            Span::styled(c.to_string(), theme.accent_bold_style())
        } else if i < filled {
            Span::styled(FILLED.to_string(), theme.accent_style())
        } else {
            Span::styled(c.to_string(), theme.text_secondary_style())
        };
        spans.push(span);
    }
    spans.push(Span::styled(time_display, theme.text_style()));
    Line::from(spans)
}

pub fn render_progress(
    frame: &mut Frame,
    area: Rect,
    current_ms: u64,
    total_ms: u64,
    markers: &[u64],
    theme: &Theme,
) {
    let line = progress_line(area.width, current_ms, total_ms, markers, theme);
    frame.render_widget(Paragraph::new(line), area);
}
