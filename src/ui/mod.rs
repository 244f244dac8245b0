pub mod layout;
pub mod scene;
pub mod text;
pub mod theme;
pub mod widgets;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::{app::state::AppState, resilience::freshness::FreshnessState};

pub const MIN_WIDTH: u16 = 30;
pub const MIN_HEIGHT: u16 = 12;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let warning = Paragraph::new(format!(
            "Terminal too small. Resize to at least {MIN_WIDTH}x{MIN_HEIGHT}."
        ))
        .block(Block::default().borders(Borders::ALL).title("nimbus-weather"));
        frame.render_widget(warning, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(55),
            Constraint::Percentage(45),
            Constraint::Length(1),
        ])
        .split(area);

    widgets::current::render(frame, chunks[0], state);
    widgets::forecast::render(frame, chunks[1], state);
    render_help_line(frame, chunks[2]);

    render_status_badge(frame, area, state);
}

fn render_help_line(frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new("q quit  r refresh  c/f units").style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn render_status_badge(frame: &mut Frame, area: Rect, state: &AppState) {
    if state.weather.is_none() {
        return;
    }
    let label = match state.refresh_meta.state {
        FreshnessState::Fresh => None,
        FreshnessState::Stale => Some(("⚠ stale", Color::Yellow)),
        FreshnessState::Offline => Some(("⚠ offline", Color::LightRed)),
    };

    if let Some((text, color)) = label {
        let width = (text.chars().count() as u16 + 2).min(area.width);
        let badge_area = Rect {
            x: area.right().saturating_sub(width + 1),
            y: area.y,
            width,
            height: 1,
        };
        let badge = Paragraph::new(Line::from(text)).style(
            Style::default()
                .fg(color)
                .bg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(badge, badge_area);
    }
}
