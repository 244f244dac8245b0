use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta, Utc};
use chrono_tz::Tz;
use nimbus_weather::domain::{
    alignment::{AlignmentStep, Reference, resolve_start_index},
    weather::DailySeries,
    window::{TODAY_LABEL, build_window},
};
use proptest::prelude::*;

const ZONES: [&str; 8] = [
    "Pacific/Honolulu",
    "Pacific/Kiritimati",
    "Pacific/Pago_Pago",
    "America/Santiago",
    "America/New_York",
    "Europe/Stockholm",
    "Asia/Kolkata",
    "Australia/Lord_Howe",
];

fn series_around(today: NaiveDate, before: usize, after: usize) -> Vec<String> {
    (0..=before + after)
        .map(|i| {
            let delta = i as i64 - before as i64;
            (today + TimeDelta::days(delta)).format("%Y-%m-%d").to_string()
        })
        .collect()
}

fn series(dates: Vec<String>, zone: Option<&str>, offset: Option<i32>) -> DailySeries {
    let n = dates.len();
    DailySeries {
        dates,
        timezone_name: zone.map(str::to_string),
        utc_offset_seconds: offset,
        high_c: vec![Some(20.0); n],
        low_c: vec![Some(10.0); n],
        condition_codes: vec![Some(0); n],
    }
}

fn instant(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap_or_default()
}

proptest! {
    #[test]
    fn zone_today_is_found_wherever_it_sits(
        seconds in 946_684_800i64..2_208_988_800i64,
        zone_idx in 0usize..ZONES.len(),
        observer_hours in -12i32..=14,
        before in 0usize..7,
        after in 0usize..7,
    ) {
        let zone_name = ZONES[zone_idx];
        let tz: Tz = zone_name.parse().unwrap();
        let now = instant(seconds);
        let today = now.with_timezone(&tz).date_naive();

        let series = series(series_around(today, before, after), Some(zone_name), None);
        let reference = Reference::new(now, FixedOffset::east_opt(observer_hours * 3600).unwrap());
        let alignment = resolve_start_index(&series, reference);

        prop_assert_eq!(alignment.start_index, before);
        prop_assert_eq!(alignment.step, AlignmentStep::ZoneMatch);
    }

    #[test]
    fn offset_today_is_found_without_zone(
        seconds in 946_684_800i64..2_208_988_800i64,
        quarter_hours in -48i32..=56,
        before in 0usize..7,
        after in 0usize..7,
    ) {
        let offset_seconds = quarter_hours * 900;
        let shifted = instant(seconds) + TimeDelta::seconds(i64::from(offset_seconds));
        let today = shifted.naive_utc().date();

        let series = series(series_around(today, before, after), None, Some(offset_seconds));
        let reference = Reference::new(instant(seconds), FixedOffset::east_opt(0).unwrap());
        let alignment = resolve_start_index(&series, reference);

        prop_assert_eq!(alignment.start_index, before);
        prop_assert_eq!(alignment.step, AlignmentStep::OffsetMatch);
    }

    #[test]
    fn window_never_exceeds_bounds(
        len in 0usize..12,
        start in 0usize..16,
        max_days in 0usize..9,
    ) {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let dates = if len == 0 { Vec::new() } else { series_around(today, 0, len - 1) };
        let series = series(dates, Some("Europe/Stockholm"), None);
        let days = build_window(&series, start, max_days, FixedOffset::east_opt(0).unwrap());

        prop_assert_eq!(days.len(), max_days.min(len.saturating_sub(start)));
        if let Some(first) = days.first() {
            prop_assert_eq!(first.label.as_str(), TODAY_LABEL);
            prop_assert_eq!(&first.date, &series.dates[start]);
        }
    }

    #[test]
    fn resolved_index_is_always_in_range(
        seconds in 946_684_800i64..2_208_988_800i64,
        dates in proptest::collection::vec("[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}", 0..8),
        zone_idx in 0usize..ZONES.len(),
    ) {
        let len = dates.len();
        let series = series(dates, Some(ZONES[zone_idx]), None);
        let reference = Reference::new(instant(seconds), FixedOffset::east_opt(0).unwrap());
        let alignment = resolve_start_index(&series, reference);
        prop_assert!(alignment.start_index < len.max(1));
    }
}
