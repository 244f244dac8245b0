use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

mod conditions;
mod conversions;

pub use conditions::{ConditionCategory, condition_category, condition_icon, condition_label};
pub use conversions::{convert_temp, parse_date, parse_date_lenient, round_temp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Units {
    Celsius,
    Fahrenheit,
}

impl Units {
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

/// A resolved place to fetch weather for. Produced by the location chain and
/// passed through to the forecast client untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl LocationFix {
    #[must_use]
    pub fn from_coords(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            label: format!("{latitude:.4}, {longitude:.4}"),
            timezone: None,
        }
    }

    /// Cache identity for a fix; two fixes with the same key render the same series.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{:.4},{:.4}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature_2m_c: f32,
    pub apparent_temperature_c: Option<f32>,
    pub relative_humidity_2m: Option<f32>,
    pub weather_code: u8,
    pub wind_speed_10m: Option<f32>,
    pub is_day: bool,
}

/// Raw daily payload from one forecast request. The per-day vectors are parallel
/// to `dates` but may be shorter; a missing or null entry reads as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeries {
    pub dates: Vec<String>,
    pub timezone_name: Option<String>,
    pub utc_offset_seconds: Option<i32>,
    pub high_c: Vec<Option<f32>>,
    pub low_c: Vec<Option<f32>>,
    pub condition_codes: Vec<Option<u8>>,
}

impl DailySeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Declared IANA zone, if present and known to the tz database.
    #[must_use]
    pub fn zone(&self) -> Option<Tz> {
        self.timezone_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .and_then(|name| name.parse::<Tz>().ok())
    }

    #[must_use]
    pub fn fixed_offset(&self) -> Option<FixedOffset> {
        self.utc_offset_seconds.and_then(FixedOffset::east_opt)
    }

    #[must_use]
    pub fn high_at(&self, idx: usize) -> Option<f32> {
        self.high_c.get(idx).copied().flatten()
    }

    #[must_use]
    pub fn low_at(&self, idx: usize) -> Option<f32> {
        self.low_c.get(idx).copied().flatten()
    }

    #[must_use]
    pub fn condition_at(&self, idx: usize) -> Option<u8> {
        self.condition_codes.get(idx).copied().flatten()
    }
}

#[derive(Debug, Clone)]
pub struct ForecastBundle {
    pub location: LocationFix,
    pub current: Option<CurrentConditions>,
    pub daily: DailySeries,
    pub fetched_at: DateTime<Utc>,
}

impl ForecastBundle {
    #[must_use]
    pub fn current_weather_code(&self) -> Option<u8> {
        self.current.as_ref().map(|c| c.weather_code)
    }

    #[must_use]
    pub fn current_temp(&self, units: Units) -> Option<i32> {
        self.current
            .as_ref()
            .map(|c| round_temp(convert_temp(c.temperature_2m_c, units)))
    }
}
