use chrono::FixedOffset;

use super::alignment::DayClock;
use super::weather::{
    ConditionCategory, DailySeries, Units, condition_category, convert_temp, parse_date_lenient,
    round_temp,
};

pub const TODAY_LABEL: &str = "Today";
pub const UNKNOWN_READING: &str = "--";

/// A per-day temperature that may be missing from the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    Known(f32),
    Unknown,
}

impl From<Option<f32>> for Reading {
    fn from(value: Option<f32>) -> Self {
        match value {
            Some(v) if v.is_finite() => Self::Known(v),
            _ => Self::Unknown,
        }
    }
}

impl Reading {
    #[must_use]
    pub fn is_known(self) -> bool {
        matches!(self, Self::Known(_))
    }

    #[must_use]
    pub fn rounded(self, units: Units) -> Option<i32> {
        match self {
            Self::Known(celsius) => Some(round_temp(convert_temp(celsius, units))),
            Self::Unknown => None,
        }
    }

    #[must_use]
    pub fn display(self, units: Units) -> String {
        self.rounded(units)
            .map_or_else(|| UNKNOWN_READING.to_string(), |t| format!("{t}°"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: String,
    pub label: String,
    pub high: Reading,
    pub low: Reading,
    pub condition_code: Option<u8>,
    pub condition: ConditionCategory,
}

/// Visible forecast days starting at `start_index`, at most `max_days` of
/// them and never past the end of the series.
#[must_use]
pub fn build_window(
    series: &DailySeries,
    start_index: usize,
    max_days: usize,
    observer_offset: FixedOffset,
) -> Vec<ForecastDay> {
    let count = max_days.min(series.len().saturating_sub(start_index));
    let clock = DayClock::for_series(series, observer_offset);

    (0..count)
        .map(|offset| {
            let idx = start_index + offset;
            let date = series.dates[idx].clone();
            let condition_code = series.condition_at(idx);
            ForecastDay {
                label: day_label(offset, &date, clock),
                high: series.high_at(idx).into(),
                low: series.low_at(idx).into(),
                condition_code,
                condition: condition_category(condition_code),
                date,
            }
        })
        .collect()
}

fn day_label(offset: usize, date: &str, clock: DayClock) -> String {
    if offset == 0 {
        return TODAY_LABEL.to_string();
    }
    parse_date_lenient(date)
        .and_then(|day| clock.weekday_of(day))
        .map_or_else(|| date.to_string(), |weekday| weekday.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowKey {
    pub start_index: usize,
    pub series_len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowUpdate {
    Rebuilt,
    Unchanged,
}

/// Memoized window for one rendering target. Rebuilds only when the start
/// index or the series length moves; data changes under the same shape are
/// not detected, so callers invalidate on a location switch.
#[derive(Debug, Clone)]
pub struct WindowCache {
    max_days: usize,
    key: Option<WindowKey>,
    days: Vec<ForecastDay>,
    rebuilds: u64,
}

impl WindowCache {
    #[must_use]
    pub fn new(max_days: usize) -> Self {
        Self {
            max_days,
            key: None,
            days: Vec::new(),
            rebuilds: 0,
        }
    }

    pub fn refresh(
        &mut self,
        series: &DailySeries,
        start_index: usize,
        observer_offset: FixedOffset,
    ) -> WindowUpdate {
        let key = WindowKey {
            start_index,
            series_len: series.len(),
        };
        if self.key == Some(key) {
            return WindowUpdate::Unchanged;
        }

        self.days = build_window(series, start_index, self.max_days, observer_offset);
        self.key = Some(key);
        self.rebuilds = self.rebuilds.saturating_add(1);
        WindowUpdate::Rebuilt
    }

    pub fn invalidate(&mut self) {
        self.key = None;
    }

    #[must_use]
    pub fn days(&self) -> &[ForecastDay] {
        &self.days
    }

    #[must_use]
    pub fn key(&self) -> Option<WindowKey> {
        self.key
    }

    #[must_use]
    pub fn max_days(&self) -> usize {
        self.max_days
    }

    #[must_use]
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }
}

#[cfg(test)]
mod tests;
