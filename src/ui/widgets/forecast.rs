use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    app::state::AppState,
    cli::IconMode,
    domain::{
        weather::{Units, condition_icon, condition_label},
        window::{ForecastDay, Reading, TODAY_LABEL},
    },
    ui::{
        layout::{DayDensity, day_column_width, day_density, visible_day_count},
        theme::{icon_color, temp_color},
    },
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let degraded = state.alignment.as_ref().is_some_and(|a| a.is_degraded());
    let title = if degraded {
        "Forecast (approx. days)"
    } else {
        "Forecast"
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let days = state.window.days();
    if days.is_empty() {
        let message = if state.weather.is_some() {
            "No daily forecast available"
        } else {
            "Waiting for forecast..."
        };
        frame.render_widget(
            Paragraph::new(message).alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let density = day_density(area.width);
    let visible = visible_day_count(area.width, days.len());
    let width = day_column_width(density);
    let mut constraints = vec![Constraint::Length(width); visible];
    constraints.push(Constraint::Min(0));
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(inner);

    for (day, column) in days.iter().take(visible).zip(columns.iter()) {
        let lines = day_lines(day, state.units, state.icon_mode, density);
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            *column,
        );
    }
}

fn day_lines(
    day: &ForecastDay,
    units: Units,
    icon_mode: IconMode,
    density: DayDensity,
) -> Vec<Line<'static>> {
    let label_style = if day.label == TODAY_LABEL {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let mut lines = vec![
        Line::from(Span::styled(day.label.clone(), label_style)),
        Line::from(Span::styled(
            condition_icon(day.condition, icon_mode, true).to_string(),
            Style::default().fg(icon_color(day.condition)),
        )),
        Line::from(vec![
            reading_span(day.high, units),
            Span::raw(" / "),
            reading_span(day.low, units),
        ]),
    ];
    if density == DayDensity::Wide {
        lines.push(Line::from(Span::styled(
            condition_label(day.condition),
            Style::default().fg(Color::Gray),
        )));
    }
    lines
}

fn reading_span(reading: Reading, units: Units) -> Span<'static> {
    let style = match reading {
        Reading::Known(celsius) => Style::default().fg(temp_color(celsius)),
        Reading::Unknown => Style::default().fg(Color::DarkGray),
    };
    Span::styled(reading.display(units), style)
}
