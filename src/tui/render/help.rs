//! Help overlay listing the player's keyboard shortcuts.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::theme::Theme;
use crate::tui::ui::centered_fixed;

/// Sections of (key, description) pairs shown in the overlay.
pub const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Playback",
        &[
            ("Space / k", "Play / Pause"),
            ("<- / ,", "Seek back"),
            ("-> / .", "Seek forward"),
            ("Home / End", "Go to start / end"),
            ("+ / -", "Speed up / down"),
        ],
    ),
    (
        "Files",
        &[
            ("Tab", "Next file"),
            ("Shift+Tab", "Previous file"),
            ("1-9", "Show file by number"),
            ("f", "Toggle follow recording"),
        ],
    ),
    ("General", &[("?", "Show this help"), ("q / Esc", "Quit player")]),
];

/// Width of the help box including borders.
pub const HELP_BOX_WIDTH: u16 = 44;

const KEY_COLUMN: usize = 14;

/// Lines of the help body, without the surrounding border.
pub fn help_lines(theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, (section, keys)) in HELP_SECTIONS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::raw(""));
        }
        lines.push(Line::from(Span::styled(
            format!(" {}", section),
            theme.text_style(),
        )));
        for (key, desc) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("   {:<width$}", key, width = KEY_COLUMN), theme.accent_style()),
                Span::styled(desc.to_string(), theme.text_secondary_style()),
            ]));
        }
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "       Press any key to close".to_string(),
        theme.text_secondary_style(),
    )));
    lines
}

/// Draw the overlay centered over `area`.
pub fn render_help(frame: &mut Frame, area: Rect, theme: &Theme) {
    let lines = help_lines(theme);
    let height = lines.len() as u16 + 2;
    let popup = centered_fixed(HELP_BOX_WIDTH, height, area);

    let block = Block::default()
        .title(" creplay help ")
        .borders(Borders::ALL)
        .border_style(theme.accent_style());
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_mentions_every_section() {
        let text: Vec<String> = help_lines(&Theme::default())
            .iter()
            .map(|l| l.to_string())
            .collect();
        for (section, _) in HELP_SECTIONS {
            assert!(text.iter().any(|l| l.trim() == *section));
        }
        assert!(text.iter().any(|l| l.contains("Toggle follow recording")));
    }

    #[test]
    fn help_lines_fit_the_box() {
        for line in help_lines(&Theme::default()) {
            assert!(line.width() <= HELP_BOX_WIDTH as usize - 2, "{}", line);
        }
    }
}
