//! Locates "today" inside a provider's daily series.
//!
//! Providers key their daily arrays by calendar strings in the location's own
//! timezone, and the first entry is not reliably today. Every comparison here
//! converts instants back into the provider's string form first, so no date is
//! ever shifted twice.

use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc, Weekday,
};
use chrono_tz::Tz;

use super::weather::{DailySeries, parse_date_lenient};

/// The moment to align against, plus the observer's own UTC offset for series
/// that declare no timezone at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub instant: DateTime<Utc>,
    pub observer_offset: FixedOffset,
}

impl Reference {
    #[must_use]
    pub fn new(instant: DateTime<Utc>, observer_offset: FixedOffset) -> Self {
        Self {
            instant,
            observer_offset,
        }
    }

    #[must_use]
    pub fn now() -> Self {
        let now = Local::now();
        Self {
            instant: now.with_timezone(&Utc),
            observer_offset: *now.offset(),
        }
    }
}

/// How a calendar day is read off an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayClock {
    /// Declared IANA zone.
    Zone(Tz),
    /// Declared raw UTC offset; the instant is shifted and read in UTC fields.
    Offset(FixedOffset),
    /// Nothing declared; the observer's local calendar.
    Observer(FixedOffset),
}

impl DayClock {
    /// Best clock the series supports: zone, then offset, then the observer.
    #[must_use]
    pub fn for_series(series: &DailySeries, observer_offset: FixedOffset) -> Self {
        if let Some(tz) = series.zone() {
            Self::Zone(tz)
        } else if let Some(offset) = series.fixed_offset() {
            Self::Offset(offset)
        } else {
            Self::Observer(observer_offset)
        }
    }

    #[must_use]
    pub fn date_of(self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            Self::Zone(tz) => instant.with_timezone(&tz).date_naive(),
            Self::Offset(offset) => {
                let shifted =
                    instant.naive_utc() + TimeDelta::seconds(i64::from(offset.local_minus_utc()));
                shifted.date()
            }
            Self::Observer(offset) => instant.with_timezone(&offset).date_naive(),
        }
    }

    #[must_use]
    pub fn day_key(self, instant: DateTime<Utc>) -> String {
        format_day(self.date_of(instant))
    }

    /// First instant of `date` on this clock. A midnight swallowed by a DST
    /// gap resolves to the first valid hour of that day.
    #[must_use]
    pub fn midnight(self, date: NaiveDate) -> Option<DateTime<Utc>> {
        let midnight = date.and_time(NaiveTime::MIN);
        match self {
            Self::Zone(tz) => tz
                .from_local_datetime(&midnight)
                .earliest()
                .or_else(|| {
                    tz.from_local_datetime(&(midnight + TimeDelta::hours(1)))
                        .earliest()
                })
                .map(|dt| dt.with_timezone(&Utc)),
            Self::Offset(offset) | Self::Observer(offset) => offset
                .from_local_datetime(&midnight)
                .single()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }

    /// Weekday of a calendar day, read back through this clock from its own midnight.
    #[must_use]
    pub fn weekday_of(self, date: NaiveDate) -> Option<Weekday> {
        self.midnight(date).map(|instant| self.date_of(instant).weekday())
    }
}

#[must_use]
pub fn format_day(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Which rule in the fallback chain produced the start index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentStep {
    ZoneMatch,
    OffsetMatch,
    ObserverMatch,
    YesterdayAnchored,
    Rederived,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub start_index: usize,
    /// "Today" as derived by the best available clock; `None` for an empty series.
    pub today: Option<String>,
    pub step: AlignmentStep,
}

impl Alignment {
    /// True when no declared-timezone match was found and a heuristic or
    /// default picked the index.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !matches!(
            self.step,
            AlignmentStep::ZoneMatch | AlignmentStep::OffsetMatch
        )
    }
}

/// Index of "today" in `series.dates`. Never fails: an unresolvable or empty
/// series yields index 0 with a degraded step.
#[must_use]
pub fn resolve_start_index(series: &DailySeries, reference: Reference) -> Alignment {
    if series.is_empty() {
        return Alignment {
            start_index: 0,
            today: None,
            step: AlignmentStep::Fallback,
        };
    }

    let zone = series.zone();
    let offset = series.fixed_offset();
    let instant = reference.instant;

    if let Some(tz) = zone
        && let Some(found) =
            exact_match(series, DayClock::Zone(tz), instant, AlignmentStep::ZoneMatch)
    {
        return found;
    }
    if let Some(offset) = offset
        && let Some(found) = exact_match(
            series,
            DayClock::Offset(offset),
            instant,
            AlignmentStep::OffsetMatch,
        )
    {
        return found;
    }
    if zone.is_none()
        && offset.is_none()
        && let Some(found) = exact_match(
            series,
            DayClock::Observer(reference.observer_offset),
            instant,
            AlignmentStep::ObserverMatch,
        )
    {
        return found;
    }

    let clock = DayClock::for_series(series, reference.observer_offset);
    let today = clock.date_of(instant);
    let today_key = format_day(today);

    if anchored_on_yesterday(series, today) {
        return Alignment {
            start_index: 1,
            today: Some(today_key),
            step: AlignmentStep::YesterdayAnchored,
        };
    }

    if let Some(idx) = rederived_match(series, clock, &today_key) {
        return Alignment {
            start_index: idx,
            today: Some(today_key),
            step: AlignmentStep::Rederived,
        };
    }

    Alignment {
        start_index: 0,
        today: Some(today_key),
        step: AlignmentStep::Fallback,
    }
}

fn exact_match(
    series: &DailySeries,
    clock: DayClock,
    instant: DateTime<Utc>,
    step: AlignmentStep,
) -> Option<Alignment> {
    let today = clock.day_key(instant);
    let idx = series.dates.iter().position(|date| *date == today)?;
    Some(Alignment {
        start_index: idx,
        today: Some(today),
        step,
    })
}

// Exact string search has already failed here, so the first two entries are
// compared as parsed calendar days.
fn anchored_on_yesterday(series: &DailySeries, today: NaiveDate) -> bool {
    let (Some(first), Some(second)) = (series.dates.first(), series.dates.get(1)) else {
        return false;
    };
    let Some(yesterday) = today.pred_opt() else {
        return false;
    };
    parse_date_lenient(first) == Some(yesterday) && parse_date_lenient(second) == Some(today)
}

fn rederived_match(series: &DailySeries, clock: DayClock, today_key: &str) -> Option<usize> {
    series.dates.iter().position(|candidate| {
        parse_date_lenient(candidate)
            .and_then(|date| clock.midnight(date))
            .is_some_and(|instant| clock.day_key(instant) == today_key)
    })
}
