use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::engine::CharStatus;

/// Characters revealed at a time in progressive mode
pub const REVEAL_STEP: usize = 150;

/// How much of a long text to show: one step at first, another step each
/// time the typist gets through 70% of what is visible.
pub fn reveal_window(typed: usize, total: usize) -> usize {
    let mut visible = REVEAL_STEP.min(total);
    while visible < total && typed >= visible * 7 / 10 {
        visible = (visible + REVEAL_STEP).min(total);
    }
    visible
}

fn style_for(status: CharStatus) -> Style {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim_bold = bold.add_modifier(Modifier::DIM);
    match status {
        CharStatus::Correct => bold.fg(Color::Green),
        CharStatus::Incorrect => bold.fg(Color::Red),
        CharStatus::Cursor => dim_bold.add_modifier(Modifier::UNDERLINED),
        CharStatus::Untyped => dim_bold,
    }
}

/// Render the first `limit` characters of `reference`, one line per
/// newline in the text.
pub fn styled_lines(reference: &str, statuses: &[CharStatus], limit: usize) -> Vec<Line<'static>> {
    let mut lines = vec![];
    let mut spans: Vec<Span<'static>> = vec![];

    for (c, status) in reference.chars().zip(statuses.iter().copied()).take(limit) {
        let style = style_for(status);
        match c {
            '\n' => {
                spans.push(Span::styled("⏎", style));
                lines.push(Line::from(std::mem::take(&mut spans)));
            }
            '\t' => spans.push(Span::styled("    ", style)),
            ' ' if status == CharStatus::Incorrect => spans.push(Span::styled("·", style)),
            c => spans.push(Span::styled(c.to_string(), style)),
        }
    }
    lines.push(Line::from(spans));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_fully_visible() {
        assert_eq!(reveal_window(0, 80), 80);
    }

    #[test]
    fn reveal_grows_at_seventy_percent() {
        assert_eq!(reveal_window(0, 1000), 150);
        assert_eq!(reveal_window(104, 1000), 150);
        assert_eq!(reveal_window(105, 1000), 300);
        assert_eq!(reveal_window(210, 1000), 450);
        assert_eq!(reveal_window(1000, 1000), 1000);
    }

    #[test]
    fn newlines_split_lines() {
        let statuses = vec![CharStatus::Correct; 5];
        let lines = styled_lines("ab\ncd", &statuses, usize::MAX);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans.len(), 3);
        assert_eq!(lines[0].spans[2].content, "⏎");
        assert_eq!(lines[1].spans.len(), 2);
    }

    #[test]
    fn mistyped_space_is_marked() {
        let statuses = [CharStatus::Correct, CharStatus::Incorrect, CharStatus::Cursor];
        let lines = styled_lines("a b", &statuses, usize::MAX);
        assert_eq!(lines[0].spans[1].content, "·");
        assert_eq!(lines[0].spans[1].style.fg, Some(Color::Red));
    }

    #[test]
    fn limit_truncates() {
        let statuses = vec![CharStatus::Untyped; 10];
        let lines = styled_lines("abcdefghij", &statuses, 4);
        assert_eq!(lines[0].spans.len(), 4);
    }
}
