use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::app::App;
use crate::mode::Mode;

use super::HORIZONTAL_MARGIN;

const ABOUT_TEXT: &[&str] = &[
    "typingo is a typing practice tool for the terminal.",
    "",
    "Pick a test from the menu. Quick Test waits for you to press space; every other test starts on your first keystroke.",
    "Easy mode drills the alphabet or short words, Hard mode locks out backspace, Code mode uses a real snippet, and the Time Based test runs against the clock.",
    "",
    "Speed is measured in words per minute, where a word is any five characters you type. Accuracy is the share of typed characters that match the text at the same position.",
    "",
    "Nothing you type is stored. Words and code snippets come from public web services; if those can't be reached a built-in text is used instead.",
];

/// Home screen: the list of test modes
pub fn render_menu(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(Mode::ALL.len() as u16 * 2),
            Constraint::Length(1),
        ])
        .split(area);

    Paragraph::new(vec![
        Line::from(Span::styled(
            "typingo",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "improve your typing speed and accuracy",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ])
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    let lines: Vec<Line> = Mode::ALL
        .iter()
        .enumerate()
        .flat_map(|(idx, mode)| {
            let selected = idx == app.menu_index;
            let marker = if selected { "> " } else { "  " };
            let title_style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            let mut title = vec![Span::styled(format!("{marker}{}", mode.title()), title_style)];
            if let Some(option) = mode.option_label(&app.options) {
                title.push(Span::styled(
                    format!("  [{option}]"),
                    Style::default().fg(Color::Gray),
                ));
            }
            [
                Line::from(title),
                Line::from(Span::styled(
                    format!("    {}", mode.description()),
                    Style::default().add_modifier(Modifier::DIM),
                )),
            ]
        })
        .collect();

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Tests"))
        .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        "(↑/↓) select / (enter) start / (?) about / (esc)ape",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(chunks[2], buf);
}

pub fn render_loading(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(vec![
        Line::from(Span::styled(
            format!("Loading {}…", app.mode.title()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        )),
        Line::from(Span::styled(
            "(esc) back",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ])
    .alignment(Alignment::Center)
    .render(chunks[1], buf);
}

pub fn render_about(area: Rect, buf: &mut Buffer) {
    let mut lines: Vec<Line> = ABOUT_TEXT.iter().map(|l| Line::from(*l)).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "(esc) back",
        Style::default().add_modifier(Modifier::ITALIC),
    )));

    let inner = Layout::default()
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(1)
        .constraints([Constraint::Min(0)])
        .split(area);

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("About"))
        .wrap(Wrap { trim: true })
        .render(inner[0], buf);
}
