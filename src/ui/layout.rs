#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayDensity {
    Wide,
    Compact,
    Narrow,
}

#[must_use]
pub fn day_density(width: u16) -> DayDensity {
    match width {
        70..=u16::MAX => DayDensity::Wide,
        44..=69 => DayDensity::Compact,
        _ => DayDensity::Narrow,
    }
}

/// Width of one forecast column, border excluded.
#[must_use]
pub fn day_column_width(density: DayDensity) -> u16 {
    match density {
        DayDensity::Wide => 14,
        DayDensity::Compact => 11,
        DayDensity::Narrow => 9,
    }
}

/// How many of `available` forecast days fit side by side in `width`
/// columns. Never more than the window holds, never zero when it holds any.
#[must_use]
pub fn visible_day_count(width: u16, available: usize) -> usize {
    if available == 0 {
        return 0;
    }
    let column = day_column_width(day_density(width));
    let fit = usize::from(width.saturating_sub(2) / column).max(1);
    fit.min(available)
}
