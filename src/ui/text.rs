//! Plain-text rendering used by `--one-shot`.

use std::fmt::Write as _;

use crate::{
    cli::IconMode,
    domain::{
        alignment::Alignment,
        weather::{ForecastBundle, Units, condition_category, condition_icon, condition_label},
        window::ForecastDay,
    },
};

const LABEL_WIDTH: usize = 5;

#[must_use]
pub fn format_snapshot(
    bundle: &ForecastBundle,
    alignment: &Alignment,
    days: &[ForecastDay],
    units: Units,
    icon_mode: IconMode,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", bundle.location.label);

    if let Some(current) = bundle.current.as_ref() {
        let category = condition_category(Some(current.weather_code));
        let temp = bundle.current_temp(units).unwrap_or_default();
        let _ = writeln!(
            out,
            "Now    {}  {temp}{}  {}",
            condition_icon(category, icon_mode, current.is_day),
            units.suffix(),
            condition_label(category)
        );
    }

    if days.is_empty() {
        out.push_str("No daily forecast available\n");
        return out;
    }

    for day in days {
        let _ = writeln!(
            out,
            "{:<LABEL_WIDTH$}  {}  {} / {}  {}",
            day.label,
            condition_icon(day.condition, icon_mode, true),
            day.high.display(units),
            day.low.display(units),
            condition_label(day.condition)
        );
    }

    if alignment.is_degraded() {
        out.push_str("(day alignment approximate)\n");
    }
    out
}
