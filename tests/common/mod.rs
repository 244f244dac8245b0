#![allow(dead_code)]

use std::time::Duration;

use nimbus_weather::{
    cli::{Cli, UnitsArg},
    domain::weather::LocationFix,
    resilience::retry::RetryPolicy,
};
use serde_json::{Value, json};

pub fn cli() -> Cli {
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
        one_shot: true,
        log_file: None,
        forecast_url: None,
        ipapi_url: None,
        ipwho_url: None,
    }
}

pub fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(1))
}

pub fn honolulu_fix() -> LocationFix {
    LocationFix {
        latitude: 21.3069,
        longitude: -157.8583,
        label: "Honolulu, United States".to_string(),
        timezone: Some("Pacific/Honolulu".to_string()),
    }
}

/// Open-Meteo shaped payload for Honolulu, one week from May 30th 2024.
pub fn honolulu_payload() -> Value {
    json!({
        "latitude": 21.3,
        "longitude": -157.86,
        "timezone": "Pacific/Honolulu",
        "timezone_abbreviation": "HST",
        "utc_offset_seconds": -36000,
        "current": {
            "time": "2024-05-31T16:00",
            "temperature_2m": 27.4,
            "apparent_temperature": 29.1,
            "relative_humidity_2m": 64,
            "weather_code": 2,
            "wind_speed_10m": 18.7,
            "is_day": 1
        },
        "daily": {
            "time": [
                "2024-05-30", "2024-05-31", "2024-06-01", "2024-06-02",
                "2024-06-03", "2024-06-04", "2024-06-05"
            ],
            "weather_code": [3, 2, 61, 80, null, 0, 1],
            "temperature_2m_max": [28.1, 28.6, 27.2, 26.9, 28.0, null, 29.3],
            "temperature_2m_min": [21.4, 21.9, 22.1, 21.7, 21.2, 21.0, 22.4]
        }
    })
}

pub fn ipwho_honolulu() -> Value {
    json!({
        "ip": "203.0.113.9",
        "success": true,
        "city": "Honolulu",
        "region": "Hawaii",
        "country": "United States",
        "latitude": 21.3069,
        "longitude": -157.8583,
        "timezone": { "id": "Pacific/Honolulu", "utc": "-10:00" }
    })
}
