//! Editor pane: the displayed buffer with a line-number gutter.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::theme::Theme;

/// Count digits in a number (for gutter width).
#[inline]
pub fn count_digits(n: usize) -> usize {
    if n == 0 {
        1
    } else {
        (n as f64).log10().floor() as usize + 1
    }
}

/// First visible line (0-based) so that `line` (0-based) stays on screen.
///
/// The view only moves when the line leaves it, and never scrolls past the
/// last line.
pub fn scroll_to_show(scroll: usize, line: usize, height: usize, total: usize) -> usize {
    if height == 0 {
        return 0;
    }
    let max_scroll = total.saturating_sub(height);
    let scroll = if line < scroll {
        line
    } else if line >= scroll + height {
        line + 1 - height
    } else {
        scroll
    };
    scroll.min(max_scroll)
}

/// Split buffer text into display lines. A trailing terminator opens an
/// empty last line, matching editor line numbering.
pub fn display_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).replace('\t', "    "))
        .collect()
}

/// Styled lines for the visible window of the buffer.
pub fn editor_lines(
    lines: &[String],
    scroll: usize,
    height: usize,
    cursor_line: Option<usize>,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let gutter = count_digits(lines.len());
    lines
        .iter()
        .enumerate()
        .skip(scroll)
        .take(height)
        .map(|(i, text)| {
            let number = Span::styled(
                format!("{:>width$} │ ", i + 1, width = gutter),
                theme.text_secondary_style(),
            );
            let line = Line::from(vec![number, Span::styled(text.clone(), theme.text_style())]);
            if cursor_line == Some(i + 1) {
                line.style(theme.cursor_line_style())
            } else {
                line
            }
        })
        .collect()
}

/// Render the editor pane, returning the scroll offset used.
pub fn render_editor(
    frame: &mut Frame,
    area: Rect,
    text: &str,
    cursor_line: Option<usize>,
    scroll: usize,
    theme: &Theme,
) -> usize {
    let lines = display_lines(text);
    let height = area.height as usize;
    let scroll = match cursor_line {
        Some(line) => scroll_to_show(scroll, line.saturating_sub(1), height, lines.len()),
        None => scroll.min(lines.len().saturating_sub(height)),
    };

    let content = editor_lines(&lines, scroll, height, cursor_line, theme);
    frame.render_widget(Paragraph::new(content), area);
    scroll
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_digits_works() {
        assert_eq!(count_digits(0), 1);
        assert_eq!(count_digits(9), 1);
        assert_eq!(count_digits(10), 2);
        assert_eq!(count_digits(999), 3);
        assert_eq!(count_digits(1000), 4);
    }

    #[test]
    fn scroll_keeps_visible_line() {
        assert_eq!(scroll_to_show(0, 5, 10, 100), 0);
        assert_eq!(scroll_to_show(0, 15, 10, 100), 6);
        assert_eq!(scroll_to_show(20, 15, 10, 100), 15);
    }

    #[test]
    fn scroll_never_passes_the_end() {
        assert_eq!(scroll_to_show(50, 99, 10, 100), 90);
        assert_eq!(scroll_to_show(50, 2, 10, 5), 0);
        assert_eq!(scroll_to_show(3, 3, 0, 100), 0);
    }

    #[test]
    fn display_lines_normalize_endings_and_tabs() {
        assert_eq!(display_lines("a\r\n\tb\n"), vec!["a", "    b", ""]);
        assert_eq!(display_lines(""), vec![""]);
    }

    #[test]
    fn editor_lines_have_gutter() {
        let lines = display_lines("one\ntwo\nthree");
        let rendered = editor_lines(&lines, 1, 5, Some(2), &Theme::default());
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[0].to_string(), "2 │ two");
        assert_eq!(rendered[0].style, Theme::default().cursor_line_style());
        assert_eq!(rendered[1].to_string(), "3 │ three");
    }
}
