use super::*;

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).expect("utc offset")
}

fn ten_day_series() -> DailySeries {
    let dates = (1..=10)
        .map(|day| format!("2024-03-{day:02}"))
        .collect::<Vec<_>>();
    DailySeries {
        high_c: (0..10).map(|i| Some(10.0 + i as f32)).collect(),
        low_c: (0..10).map(|i| Some(i as f32)).collect(),
        condition_codes: vec![Some(61); 10],
        dates,
        timezone_name: Some("Europe/Stockholm".to_string()),
        utc_offset_seconds: Some(3600),
    }
}

/// Stand-in for a rendering surface: counts how often it is repainted.
struct PaintTarget {
    cache: WindowCache,
    paints: usize,
    painted_labels: Vec<String>,
}

impl PaintTarget {
    fn new(max_days: usize) -> Self {
        Self {
            cache: WindowCache::new(max_days),
            paints: 0,
            painted_labels: Vec::new(),
        }
    }

    fn apply(&mut self, series: &DailySeries, start_index: usize) {
        if self.cache.refresh(series, start_index, utc()) == WindowUpdate::Rebuilt {
            self.paints += 1;
            self.painted_labels = self.cache.days().iter().map(|d| d.label.clone()).collect();
        }
    }
}

#[test]
fn window_is_bounded_by_series_end() {
    let days = build_window(&ten_day_series(), 7, 4, utc());
    assert_eq!(days.len(), 3);
    assert_eq!(days[0].date, "2024-03-08");
    assert_eq!(days[2].date, "2024-03-10");
}

#[test]
fn window_is_bounded_by_max_days() {
    let days = build_window(&ten_day_series(), 1, 4, utc());
    assert_eq!(days.len(), 4);
    assert_eq!(days[0].high, Reading::Known(11.0));
    assert_eq!(days[3].low, Reading::Known(4.0));
}

#[test]
fn empty_series_and_out_of_range_start_yield_nothing() {
    assert!(build_window(&DailySeries::default(), 0, 4, utc()).is_empty());
    assert!(build_window(&ten_day_series(), 10, 4, utc()).is_empty());
    assert!(build_window(&ten_day_series(), 42, 4, utc()).is_empty());
    assert!(build_window(&ten_day_series(), 0, 0, utc()).is_empty());
}

#[test]
fn labels_are_today_then_weekdays_of_each_date() {
    // 2024-03-02 is a Saturday.
    let days = build_window(&ten_day_series(), 1, 4, utc());
    let labels = days.iter().map(|d| d.label.as_str()).collect::<Vec<_>>();
    assert_eq!(labels, ["Today", "Sun", "Mon", "Tue"]);
}

#[test]
fn weekday_labels_do_not_shift_in_far_offset_zones() {
    let mut series = ten_day_series();
    series.timezone_name = Some("Pacific/Kiritimati".to_string());
    let east = build_window(&series, 0, 3, utc());

    series.timezone_name = Some("Pacific/Pago_Pago".to_string());
    let west = build_window(&series, 0, 3, utc());

    assert_eq!(east[1].label, "Sat");
    assert_eq!(west[1].label, "Sat");
}

#[test]
fn weekday_labels_fall_back_to_observer_offset_without_timezone() {
    let mut series = ten_day_series();
    series.timezone_name = None;
    series.utc_offset_seconds = None;
    let observer = FixedOffset::west_opt(12 * 3600).expect("observer offset");

    let days = build_window(&series, 0, 2, observer);
    assert_eq!(days[1].label, "Sat");
}

#[test]
fn unparseable_dates_keep_their_raw_label() {
    let mut series = ten_day_series();
    series.dates[1] = "soon".to_string();
    let days = build_window(&series, 0, 2, utc());
    assert_eq!(days[1].label, "soon");
}

#[test]
fn missing_temperatures_are_explicitly_unknown() {
    let mut series = ten_day_series();
    series.high_c[2] = None;
    series.low_c.truncate(2);
    let days = build_window(&series, 0, 4, utc());

    assert_eq!(days[2].high, Reading::Unknown);
    assert_eq!(days[2].high.display(Units::Celsius), "--");
    assert_eq!(days[2].low, Reading::Unknown);
    assert_eq!(days[1].low, Reading::Known(1.0));
    assert_eq!(days[1].low.display(Units::Celsius), "1°");
}

#[test]
fn non_finite_readings_are_unknown() {
    assert_eq!(Reading::from(Some(f32::NAN)), Reading::Unknown);
    assert_eq!(Reading::from(Some(f32::INFINITY)), Reading::Unknown);
    assert_eq!(Reading::from(None), Reading::Unknown);
    assert_eq!(Reading::Known(20.0).rounded(Units::Fahrenheit), Some(68));
}

#[test]
fn missing_or_unknown_condition_maps_to_default() {
    let mut series = ten_day_series();
    series.condition_codes = vec![None, Some(250)];
    let days = build_window(&series, 0, 3, utc());

    assert_eq!(days[0].condition, ConditionCategory::PartlyCloudy);
    assert_eq!(days[1].condition, ConditionCategory::PartlyCloudy);
    assert_eq!(days[1].condition_code, Some(250));
    assert_eq!(days[2].condition_code, None);
}

#[test]
fn same_start_and_length_do_not_repaint() {
    let series = ten_day_series();
    let mut target = PaintTarget::new(4);

    target.apply(&series, 1);
    target.apply(&series, 1);
    assert_eq!(target.paints, 1);
    assert_eq!(target.cache.rebuilds(), 1);
    assert_eq!(target.painted_labels.len(), 4);
}

#[test]
fn moved_start_or_new_length_repaints() {
    let mut series = ten_day_series();
    let mut target = PaintTarget::new(4);

    target.apply(&series, 1);
    target.apply(&series, 2);
    assert_eq!(target.paints, 2);

    series.dates.pop();
    target.apply(&series, 2);
    assert_eq!(target.paints, 3);
    assert_eq!(
        target.cache.key(),
        Some(WindowKey {
            start_index: 2,
            series_len: 9
        })
    );
}

#[test]
fn targets_memoize_independently() {
    let series = ten_day_series();
    let mut first = PaintTarget::new(4);
    let mut second = PaintTarget::new(2);

    first.apply(&series, 0);
    second.apply(&series, 0);
    first.apply(&series, 0);

    assert_eq!(first.paints, 1);
    assert_eq!(second.paints, 1);
    assert_eq!(second.cache.days().len(), 2);
}

#[test]
fn invalidate_forces_the_next_rebuild() {
    let series = ten_day_series();
    let mut target = PaintTarget::new(4);

    target.apply(&series, 0);
    target.cache.invalidate();
    target.apply(&series, 0);
    assert_eq!(target.paints, 2);
}

#[test]
fn empty_series_caches_an_empty_window() {
    let mut cache = WindowCache::new(4);
    assert_eq!(
        cache.refresh(&DailySeries::default(), 0, utc()),
        WindowUpdate::Rebuilt
    );
    assert!(cache.days().is_empty());
    assert_eq!(
        cache.refresh(&DailySeries::default(), 0, utc()),
        WindowUpdate::Unchanged
    );
}
