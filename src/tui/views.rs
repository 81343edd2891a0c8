use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use super::layout::{axis_bounds, centered_rect, chart_points};
use super::state::TuiState;
use crate::model::Metric;

pub fn metric_color(metric: Metric) -> Color {
    match metric {
        Metric::Total => Color::Cyan,
        Metric::Additions => Color::Green,
        Metric::Deletions => Color::Red,
        Metric::NoOfFiles => Color::Yellow,
    }
}

/// Totals header, chart (or a placeholder while hidden) and status line.
pub fn draw_main_view(f: &mut Frame, area: Rect, state: &TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    draw_totals(f, chunks[0], state);
    if state.visible {
        draw_chart(f, chunks[1], state);
    } else {
        let placeholder = Paragraph::new("No chart to display")
            .block(Block::default().borders(Borders::ALL).title("Commits per day"));
        f.render_widget(placeholder, chunks[1]);
    }
    draw_status(f, chunks[2], state);
}

fn draw_totals(f: &mut Frame, area: Rect, state: &TuiState) {
    let mut spans = Vec::new();
    for (i, metric) in Metric::ALL.iter().enumerate() {
        let style = if state.is_enabled(*metric) {
            Style::default().fg(metric_color(*metric)).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(
            format!("[{}] {}: {}", i + 1, metric.label(), state.totals.get(*metric)),
            style,
        ));
        spans.push(Span::raw("   "));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("commitscore - {}", state.username)),
    );
    f.render_widget(header, area);
}

fn draw_chart(f: &mut Frame, area: Rect, state: &TuiState) {
    let shown: Vec<_> = state
        .chart
        .series()
        .iter()
        .filter(|s| state.is_enabled(s.name))
        .collect();
    let points: Vec<Vec<(f64, f64)>> = shown.iter().map(|s| chart_points(s)).collect();
    let (x_bounds, y_bounds) = axis_bounds(&points);

    let datasets: Vec<Dataset> = shown
        .iter()
        .zip(points.iter())
        .map(|(series, data)| {
            Dataset::default()
                .name(series.name.label())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(metric_color(series.name)))
                .data(data)
        })
        .collect();

    let first_day = shown.iter().filter_map(|s| s.data.first()).map(|p| p.date).min();
    let last_day = shown.iter().filter_map(|s| s.data.last()).map(|p| p.date).max();
    let x_labels = match (first_day, last_day) {
        (Some(a), Some(b)) => vec![
            Span::raw(a.format("%Y-%m-%d").to_string()),
            Span::raw(b.format("%Y-%m-%d").to_string()),
        ],
        _ => vec![Span::raw(""), Span::raw("")],
    };
    let y_labels = vec![
        Span::raw("0"),
        Span::raw(format!("{:.0}", y_bounds[1] / 2.0)),
        Span::raw(format!("{:.0}", y_bounds[1])),
    ];

    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title("Commits per day"))
        .x_axis(
            Axis::default()
                .title("Day")
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Lines")
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(y_labels),
        );
    f.render_widget(chart, area);
}

fn draw_status(f: &mut Frame, area: Rect, state: &TuiState) {
    let (text, style) = match &state.status {
        Some(message) => (message.as_str(), Style::default().fg(Color::Red)),
        None => ("q quit  h help  1-4 toggle series  Tab cycle  a show all", Style::default().fg(Color::DarkGray)),
    };
    let status = Paragraph::new(Span::styled(text, style)).block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}

/// Draw the modal help overlay describing the key bindings.
pub fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let block = Block::default().title("Help").borders(Borders::ALL);
    let help_area = centered_rect(60, 50, area);

    f.render_widget(Clear, help_area);

    let heading = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(vec![Span::styled(
            "commitscore - Help",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![Span::styled("Series:", heading)]),
        Line::from("  1-4         Toggle total / additions / deletions / files"),
        Line::from("  Tab         Show one series at a time"),
        Line::from("  a           Show every series"),
        Line::from(""),
        Line::from(vec![Span::styled("General:", heading)]),
        Line::from("  h / F1      Toggle this help"),
        Line::from("  q / Esc     Quit"),
    ];

    f.render_widget(Paragraph::new(help_text).block(block), help_area);
}
