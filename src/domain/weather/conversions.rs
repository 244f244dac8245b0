use chrono::{NaiveDate, NaiveDateTime};

use super::Units;

#[must_use]
pub fn convert_temp(celsius: f32, units: Units) -> f32 {
    match units {
        Units::Celsius => celsius,
        Units::Fahrenheit => celsius * 1.8 + 32.0,
    }
}

#[must_use]
pub fn round_temp(value: f32) -> i32 {
    value.round() as i32
}

/// Parses the provider's canonical `YYYY-MM-DD` day format.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Accepts the shapes day strings show up in when a provider drifts from the
/// canonical format, such as a trailing time of day. chrono already tolerates
/// unpadded month and day fields.
#[must_use]
pub fn parse_date_lenient(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Some(date) = parse_date(value) {
        return Some(date);
    }
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
}
