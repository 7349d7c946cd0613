//! Colors for the player UI and the CLI output.
//!
//! Provides ratatui styles for the player and ANSI-wrapped strings for the
//! plain commands. ANSI output is only produced for an interactive stdout
//! with `NO_COLOR` unset.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    /// Editor text and most content
    pub text_primary: Color,
    /// Line numbers, hints, separators
    pub text_secondary: Color,
    /// Keybindings, playhead, active tab
    pub accent: Color,
    /// Event markers on the progress bar
    pub marker: Color,
    /// Background of the line holding the last edit
    pub cursor_line: Color,
    /// Emit ANSI codes from the text helpers
    pub ansi: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text_primary: Color::Gray,
            text_secondary: Color::DarkGray,
            accent: Color::Green,
            marker: Color::Yellow,
            cursor_line: Color::Indexed(236),
            ansi: true,
        }
    }
}

impl Theme {
    /// Same colors, never emitting ANSI codes.
    pub fn plain() -> Self {
        Self {
            ansi: false,
            ..Self::default()
        }
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Style for keybindings and the active tab.
    pub fn accent_bold_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn marker_style(&self) -> Style {
        Style::default().fg(self.marker)
    }

    pub fn cursor_line_style(&self) -> Style {
        Style::default().bg(self.cursor_line)
    }

    // ANSI color helpers for CLI output

    pub fn accent_text(&self, text: &str) -> String {
        self.wrap(self.accent, text)
    }

    pub fn primary_text(&self, text: &str) -> String {
        self.wrap(self.text_primary, text)
    }

    pub fn secondary_text(&self, text: &str) -> String {
        self.wrap(self.text_secondary, text)
    }

    fn wrap(&self, color: Color, text: &str) -> String {
        let code = color_to_ansi(color);
        if !self.ansi || code.is_empty() {
            return text.to_string();
        }
        format!("{}{}{}", code, text, ANSI_RESET)
    }
}

/// ANSI reset sequence
const ANSI_RESET: &str = "\x1b[0m";

/// Convert a ratatui Color to an ANSI escape code.
fn color_to_ansi(color: Color) -> &'static str {
    match color {
        Color::Black => "\x1b[30m",
        Color::Red => "\x1b[31m",
        Color::Green => "\x1b[32m",
        Color::Yellow => "\x1b[33m",
        Color::Blue => "\x1b[34m",
        Color::Magenta => "\x1b[35m",
        Color::Cyan => "\x1b[36m",
        Color::Gray => "\x1b[37m",
        Color::DarkGray => "\x1b[90m",
        Color::LightRed => "\x1b[91m",
        Color::LightGreen => "\x1b[92m",
        Color::LightYellow => "\x1b[93m",
        Color::LightBlue => "\x1b[94m",
        Color::LightMagenta => "\x1b[95m",
        Color::LightCyan => "\x1b[96m",
        Color::White => "\x1b[97m",
        Color::Reset => "\x1b[0m",
        // RGB and indexed colors fall back to no color
        _ => "",
    }
}

/// True when stdout is a terminal and `NO_COLOR` is unset.
pub fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
}

/// Theme for the current process.
pub fn current_theme() -> Theme {
    if color_enabled() {
        Theme::default()
    } else {
        Theme::plain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_helpers_return_theme_colors() {
        let theme = Theme::default();
        assert_eq!(theme.text_style().fg, Some(Color::Gray));
        assert_eq!(theme.text_secondary_style().fg, Some(Color::DarkGray));
        assert_eq!(theme.accent_style().fg, Some(Color::Green));
        assert_eq!(theme.marker_style().fg, Some(Color::Yellow));
        assert_eq!(theme.cursor_line_style().bg, Some(Color::Indexed(236)));
    }

    #[test]
    fn ansi_text_helpers_wrap_with_color_codes() {
        let theme = Theme::default();
        let accent = theme.accent_text("test");
        assert!(accent.starts_with("\x1b[32m"));
        assert!(accent.ends_with("\x1b[0m"));
        assert!(accent.contains("test"));
    }

    #[test]
    fn plain_theme_emits_no_codes() {
        let theme = Theme::plain();
        assert_eq!(theme.accent_text("test"), "test");
        assert_eq!(theme.secondary_text("hint"), "hint");
    }

    #[test]
    fn indexed_colors_are_not_wrapped() {
        let theme = Theme::default();
        assert_eq!(theme.wrap(Color::Indexed(236), "x"), "x");
    }

    #[test]
    fn color_to_ansi_maps_standard_colors() {
        assert_eq!(color_to_ansi(Color::Green), "\x1b[32m");
        assert_eq!(color_to_ansi(Color::Red), "\x1b[31m");
        assert_eq!(color_to_ansi(Color::DarkGray), "\x1b[90m");
        assert_eq!(color_to_ansi(Color::Reset), "\x1b[0m");
    }
}
