//! Tab bar, status bar and footer.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
    Frame,
};

use super::progress::format_duration;
use crate::tui::app::{format_speed, PlayerApp};
use crate::tui::theme::Theme;

/// Render the file tabs, highlighting the displayed file.
pub fn render_tabs(frame: &mut Frame, area: Rect, app: &PlayerApp, theme: &Theme) {
    let titles: Vec<Line<'static>> = app
        .scheduler
        .files()
        .iter()
        .enumerate()
        .map(|(i, file)| Line::from(format!("{}:{}", i + 1, file)))
        .collect();

    let tabs = Tabs::new(titles)
        .style(theme.text_secondary_style())
        .highlight_style(theme.accent_bold_style())
        .divider(Span::styled("│", theme.text_secondary_style()));
    let tabs = match app.displayed_index() {
        Some(index) => tabs.select(index),
        None => tabs,
    };
    frame.render_widget(tabs, area);
}

/// Spans of the status bar: state, recording, time, speed, file, follow mode
/// and the pending message.
pub fn status_spans(app: &PlayerApp, theme: &Theme) -> Vec<Span<'static>> {
    let scheduler = &app.scheduler;
    let mut spans = vec![
        Span::styled(format!(" {}  ", scheduler.state().label()), theme.text_style()),
        Span::styled(format!("{}  ", app.title), theme.text_secondary_style()),
        Span::styled(
            format!(
                "{} / {}  ",
                format_duration(scheduler.current_time()),
                format_duration(scheduler.duration())
            ),
            theme.text_style(),
        ),
        Span::styled("spd:".to_string(), theme.text_secondary_style()),
        Span::styled(
            format!("{}x  ", format_speed(scheduler.rate())),
            theme.text_style(),
        ),
    ];

    if let Some(file) = scheduler.displayed_file() {
        let language = scheduler.buffer_language(file).unwrap_or_default();
        let label = if language.is_empty() {
            format!("{}  ", file)
        } else {
            format!("{} ({})  ", file, language)
        };
        spans.push(Span::styled(label, theme.accent_style()));
    }
    if scheduler.follow_events() {
        spans.push(Span::styled("[follow]  ".to_string(), theme.text_secondary_style()));
    }
    if let Some(message) = &app.message {
        spans.push(Span::styled(message.clone(), theme.marker_style()));
    }
    spans
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, app: &PlayerApp, theme: &Theme) {
    let status = Paragraph::new(Line::from(status_spans(app, theme)));
    frame.render_widget(status, area);
}

/// Build styled spans for footer keybinding hints.
///
/// Keys use the accent color, descriptions the secondary color, and entries
/// are separated by " | ".
pub fn build_footer_spans(keys: &[(&str, &str)], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(keys.len() * 3);
    for (i, (key, desc)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(
                " | ".to_string(),
                Style::default().fg(theme.text_secondary),
            ));
        }
        spans.push(Span::styled(key.to_string(), Style::default().fg(theme.accent)));
        spans.push(Span::styled(
            format!(": {}", desc),
            Style::default().fg(theme.text_secondary),
        ));
    }
    spans
}

/// Render a centered footer with keybinding hints.
pub fn render_footer(frame: &mut Frame, area: Rect, keys: &[(&str, &str)], theme: &Theme) {
    let footer = Paragraph::new(Line::from(build_footer_spans(keys, theme)))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
