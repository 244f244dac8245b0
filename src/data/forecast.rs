use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    cli::Cli,
    domain::weather::{CurrentConditions, DailySeries, ForecastBundle, LocationFix},
    resilience::retry::{RetryPolicy, retry_with_backoff},
};

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const FORECAST_DAYS: u8 = 7;

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl Default for ForecastClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastClient {
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(FORECAST_URL)
    }

    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
            retry: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        cli.forecast_url
            .as_deref()
            .map_or_else(Self::new, Self::with_base_url)
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub async fn fetch(&self, location: LocationFix) -> Result<ForecastBundle> {
        let payload = retry_with_backoff(self.retry, |_| self.request(&location))
            .await
            .map_err(|err| {
                let attempts = err.attempts;
                err.into_last()
                    .context(format!("forecast unavailable after {attempts} attempt(s)"))
            })?;

        Ok(ForecastBundle {
            current: payload.current.and_then(current_conditions),
            daily: daily_series(payload.daily, payload.timezone, payload.utc_offset_seconds),
            location,
            fetched_at: Utc::now(),
        })
    }

    async fn request(&self, location: &LocationFix) -> Result<ForecastResponse> {
        let timezone = location.timezone.as_deref().unwrap_or("auto");
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                (
                    "current",
                    "temperature_2m,apparent_temperature,relative_humidity_2m,weather_code,wind_speed_10m,is_day"
                        .to_string(),
                ),
                (
                    "daily",
                    "weather_code,temperature_2m_max,temperature_2m_min".to_string(),
                ),
                ("timezone", timezone.to_string()),
                ("forecast_days", FORECAST_DAYS.to_string()),
            ])
            .send()
            .await
            .context("forecast request failed")?
            .error_for_status()
            .context("forecast request returned non-success status")?;

        response
            .json()
            .await
            .context("failed to parse forecast payload")
    }
}

fn daily_series(
    daily: Option<DailyBlock>,
    timezone: Option<String>,
    utc_offset_seconds: Option<i32>,
) -> DailySeries {
    let daily = daily.unwrap_or_default();
    DailySeries {
        dates: daily.time,
        timezone_name: timezone,
        utc_offset_seconds,
        high_c: daily.temperature_2m_max,
        low_c: daily.temperature_2m_min,
        condition_codes: daily
            .weather_code
            .into_iter()
            .map(|code| code.and_then(wmo_code))
            .collect(),
    }
}

/// WMO codes fit in a byte; anything else is treated as unknown.
fn wmo_code(raw: i64) -> Option<u8> {
    u8::try_from(raw).ok()
}

/// Without a temperature there is nothing to show, so the block is dropped
/// and the daily series is kept.
fn current_conditions(block: CurrentBlock) -> Option<CurrentConditions> {
    Some(CurrentConditions {
        temperature_2m_c: block.temperature_2m?,
        apparent_temperature_c: block.apparent_temperature,
        relative_humidity_2m: block.relative_humidity_2m,
        weather_code: block.weather_code.and_then(wmo_code).unwrap_or(2),
        wind_speed_10m: block.wind_speed_10m,
        is_day: block.is_day.is_none_or(|flag| flag == 1),
    })
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    timezone: Option<String>,
    utc_offset_seconds: Option<i32>,
    current: Option<CurrentBlock>,
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: Option<f32>,
    apparent_temperature: Option<f32>,
    relative_humidity_2m: Option<f32>,
    weather_code: Option<i64>,
    wind_speed_10m: Option<f32>,
    is_day: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    weather_code: Vec<Option<i64>>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f32>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f32>>,
}
