use chrono::Utc;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
    app::state::{AppMode, AppState},
    domain::weather::{
        ConditionCategory, CurrentConditions, ForecastBundle, Units, condition_category,
        condition_icon, condition_label, convert_temp, round_temp,
    },
    ui::theme::{icon_color, temp_color},
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let title = state
        .location
        .as_ref()
        .map_or_else(|| "nimbus-weather".to_string(), |loc| loc.fix.label.clone());
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(scene) = state.scene.as_ref() {
        scene.render(frame, inner);
    }

    let lines = match state.weather.as_ref() {
        Some(bundle) => conditions_lines(state, bundle),
        None => placeholder_lines(state),
    };
    let top_pad = inner.height.saturating_sub(lines.len() as u16) / 2;
    let text_area = Rect {
        y: inner.y + top_pad,
        height: inner.height.saturating_sub(top_pad),
        ..inner
    };
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        text_area,
    );
}

fn placeholder_lines(state: &AppState) -> Vec<Line<'static>> {
    if state.mode == AppMode::Error
        && let Some(err) = state.last_error.as_deref()
    {
        return vec![
            Line::from(Span::styled(
                "Weather unavailable",
                Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
            )),
            Line::from(err.to_string()),
            Line::from("Retrying automatically. Press r to retry now."),
        ];
    }
    vec![Line::from(state.loading_message.clone())]
}

fn conditions_lines(state: &AppState, bundle: &ForecastBundle) -> Vec<Line<'static>> {
    let Some(current) = bundle.current.as_ref() else {
        return vec![Line::from("Current conditions unavailable")];
    };
    let category = condition_category(Some(current.weather_code));
    let mut lines = vec![headline(current, category, state)];
    lines.push(Line::from(details(current, state.units)));
    if let Some(age) = state.refresh_meta.age_minutes(Utc::now()) {
        let updated = if age <= 0 {
            "Updated just now".to_string()
        } else {
            format!("Updated {age} min ago")
        };
        lines.push(Line::from(Span::styled(
            updated,
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

fn headline(
    current: &CurrentConditions,
    category: ConditionCategory,
    state: &AppState,
) -> Line<'static> {
    let temp = round_temp(convert_temp(current.temperature_2m_c, state.units));
    Line::from(vec![
        Span::styled(
            condition_icon(category, state.icon_mode, current.is_day).to_string(),
            Style::default().fg(icon_color(category)),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{temp}{}", state.units.suffix()),
            Style::default()
                .fg(temp_color(current.temperature_2m_c))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::raw(condition_label(category)),
    ])
}

fn details(current: &CurrentConditions, units: Units) -> String {
    let mut parts = Vec::new();
    if let Some(feels) = current.apparent_temperature_c {
        parts.push(format!("Feels {}°", round_temp(convert_temp(feels, units))));
    }
    if let Some(humidity) = current.relative_humidity_2m {
        parts.push(format!("Humidity {}%", humidity.round() as i32));
    }
    if let Some(wind) = current.wind_speed_10m {
        parts.push(format!("Wind {} km/h", wind.round() as i32));
    }
    parts.join("  ")
}
