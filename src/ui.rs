pub mod charting;
pub mod pages;
pub mod screen;
pub mod text_view;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
};

use crate::app::App;
use crate::mode::Mode;
use crate::session::{SessionState, StartPolicy};

pub use screen::draw;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

/// Rows the paragraph occupies once word-wrapped to `width` columns
fn wrapped_height(text: &Paragraph, width: u16) -> u16 {
    text.line_count(width).min(u16::MAX as usize) as u16
}

pub(crate) fn render_typing(app: &App, area: Rect, buf: &mut Buffer) {
    let engine = &app.engine;
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_bold_style = bold_style.add_modifier(Modifier::DIM);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let statuses = engine.char_statuses();
    let total = statuses.len();
    let limit = if app.mode == Mode::Timed {
        text_view::reveal_window(engine.typed().chars().count(), total)
    } else {
        total
    };
    let text = Paragraph::new(text_view::styled_lines(engine.reference(), &statuses, limit))
        .wrap(Wrap { trim: false });

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2);
    let text_lines = wrapped_height(&text, max_chars_per_line);
    let padding = area.height.saturating_sub(text_lines.saturating_add(6)) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(padding),
            Constraint::Length(1), // header
            Constraint::Length(1), // live stats
            Constraint::Length(1), // countdown or progress
            Constraint::Length(text_lines),
            Constraint::Length(1), // notice
            Constraint::Min(1),
            Constraint::Length(1), // legend
        ])
        .split(area);

    let mut header = vec![Span::styled(
        app.mode.title(),
        bold_style.fg(Color::Cyan),
    )];
    if let Some(option) = app.mode.option_label(&app.options) {
        header.push(Span::styled(format!("  [{option}]"), dim_bold_style));
    }
    Paragraph::new(Line::from(header))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    let stats = engine.live_stats();
    Paragraph::new(Span::styled(
        format!(
            "{} wpm   {}% acc   {} errors",
            stats.wpm, stats.accuracy, stats.errors
        ),
        bold_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    let status = match (engine.state(), engine.seconds_left()) {
        (SessionState::Idle, _) if engine.config().start == StartPolicy::Explicit => {
            "press space to start".to_string()
        }
        (_, Some(secs)) => format!("{secs}s left"),
        _ => format!("{:.0}%", engine.progress_ratio() * 100.0),
    };
    Paragraph::new(Span::styled(status, dim_bold_style))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

    // a prompt that fits on one row is centred
    text.alignment(if text_lines <= 1 {
        Alignment::Center
    } else {
        Alignment::Left
    })
    .render(chunks[4], buf);

    if let Some(notice) = app.notice() {
        Paragraph::new(Span::styled(notice, bold_style.fg(Color::Yellow)))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);
    }

    let can_cycle = app.mode.option_label(&app.options).is_some();
    let legend = if engine.state() == SessionState::Idle && can_cycle {
        "(←) retry / (→) new / (↑/↓) option / (esc) menu"
    } else {
        "(←) retry / (→) new / (esc) menu"
    };
    Paragraph::new(Span::styled(legend, italic_style)).render(chunks[7], buf);
}

pub(crate) fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(summary) = app.engine.summary() else {
        return;
    };
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);
    let magenta_style = Style::default().fg(Color::Magenta);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),    // chart
            Constraint::Length(1), // stats
            Constraint::Length(1), // session details
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
        ])
        .split(area);

    let (overall_duration, highest_wpm) =
        charting::compute_chart_params(&summary.samples, summary.elapsed_secs);

    let tuples: Vec<(f64, f64)> = summary.samples.iter().copied().map(Into::into).collect();
    let datasets = vec![Dataset::default()
        .marker(ratatui::symbols::Marker::Braille)
        .style(magenta_style)
        .graph_type(GraphType::Line)
        .data(&tuples)];

    Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("seconds")
                .bounds([0.0, overall_duration])
                .labels(vec![
                    Span::styled("0", bold_style),
                    Span::styled(charting::format_label(overall_duration), bold_style),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("wpm")
                .bounds([0.0, highest_wpm])
                .labels(vec![
                    Span::styled("0", bold_style),
                    Span::styled(charting::format_label(highest_wpm), bold_style),
                ]),
        )
        .render(chunks[0], buf);

    Paragraph::new(Span::styled(
        format!(
            "{} wpm   {}% acc   {} errors   {:.2} sd",
            summary.stats.wpm, summary.stats.accuracy, summary.stats.errors, summary.consistency
        ),
        bold_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        format!(
            "{} in {:.1}s, finished {}",
            app.mode.title(),
            summary.elapsed_secs,
            summary.finished_at.format("%H:%M:%S")
        ),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        "(r)etry / (n)ew / (m)enu / (q)uit",
        italic_style,
    ))
    .render(chunks[4], buf);
}
