use chrono::{DateTime, Utc};
use ratatui::{Terminal, backend::TestBackend};

use crate::{
    app::state::AppState,
    cli::{Cli, UnitsArg},
    data::location::fallback_location,
    domain::weather::{CurrentConditions, DailySeries, ForecastBundle, LocationFix},
};

pub(crate) fn state_test_cli() -> Cli {
    Cli {
        units: UnitsArg::Celsius,
        days: 4,
        lat: None,
        lon: None,
        remember: false,
        forget: false,
        refresh_interval: 600,
        fps: 20,
        no_animation: true,
        ascii_icons: true,
        one_shot: false,
        log_file: None,
        forecast_url: None,
        ipapi_url: None,
        ipwho_url: None,
    }
}

pub(crate) fn stockholm_fix() -> LocationFix {
    fallback_location()
}

pub(crate) fn sample_current() -> CurrentConditions {
    CurrentConditions {
        temperature_2m_c: 7.0,
        apparent_temperature_c: Some(5.0),
        relative_humidity_2m: Some(72.0),
        weather_code: 3,
        wind_speed_10m: Some(10.0),
        is_day: true,
    }
}

/// A series with one entry per date, highs climbing from 10°C.
pub(crate) fn sample_series(dates: &[&str], zone: Option<&str>) -> DailySeries {
    let n = dates.len();
    DailySeries {
        dates: dates.iter().map(|d| (*d).to_string()).collect(),
        timezone_name: zone.map(str::to_string),
        utc_offset_seconds: None,
        high_c: (0..n).map(|i| Some(10.0 + i as f32)).collect(),
        low_c: (0..n).map(|_| Some(2.0)).collect(),
        condition_codes: (0..n).map(|_| Some(3)).collect(),
    }
}

pub(crate) fn sample_bundle(
    location: LocationFix,
    daily: DailySeries,
    fetched_at: DateTime<Utc>,
) -> ForecastBundle {
    ForecastBundle {
        location,
        current: Some(sample_current()),
        daily,
        fetched_at,
    }
}

pub(crate) fn render_to_string(state: &AppState, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("test terminal");
    terminal
        .draw(|frame| crate::ui::render(frame, state))
        .expect("draw frame");
    let buffer = terminal.backend().buffer().clone();
    buffer
        .content()
        .chunks(usize::from(width))
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
