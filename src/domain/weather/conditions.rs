use crate::cli::IconMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConditionCategory {
    Clear,
    #[default]
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Showers,
    Thunderstorm,
}

/// Maps a WMO weather code to its display category. Absent and unrecognized
/// codes fall back to `PartlyCloudy`.
#[must_use]
pub fn condition_category(code: Option<u8>) -> ConditionCategory {
    match code {
        Some(0 | 1) => ConditionCategory::Clear,
        Some(3) => ConditionCategory::Cloudy,
        Some(45 | 48) => ConditionCategory::Fog,
        Some(51..=57) => ConditionCategory::Drizzle,
        Some(61..=67) => ConditionCategory::Rain,
        Some(71..=77 | 85 | 86) => ConditionCategory::Snow,
        Some(80..=82) => ConditionCategory::Showers,
        Some(95 | 96 | 99) => ConditionCategory::Thunderstorm,
        _ => ConditionCategory::PartlyCloudy,
    }
}

#[must_use]
pub fn condition_label(category: ConditionCategory) -> &'static str {
    match category {
        ConditionCategory::Clear => "Clear",
        ConditionCategory::PartlyCloudy => "Partly cloudy",
        ConditionCategory::Cloudy => "Cloudy",
        ConditionCategory::Fog => "Fog",
        ConditionCategory::Drizzle => "Drizzle",
        ConditionCategory::Rain => "Rain",
        ConditionCategory::Snow => "Snow",
        ConditionCategory::Showers => "Showers",
        ConditionCategory::Thunderstorm => "Thunderstorm",
    }
}

#[must_use]
pub fn condition_icon(category: ConditionCategory, mode: IconMode, is_day: bool) -> &'static str {
    let (ascii, unicode) = icon_tokens(category, is_day);
    match mode {
        IconMode::Ascii => ascii,
        IconMode::Unicode => unicode,
    }
}

fn icon_tokens(category: ConditionCategory, is_day: bool) -> (&'static str, &'static str) {
    match category {
        ConditionCategory::Clear if is_day => ("SUN", "☀"),
        ConditionCategory::Clear => ("MON", "☾"),
        ConditionCategory::PartlyCloudy => ("PCL", "⛅"),
        ConditionCategory::Cloudy => ("CLD", "☁"),
        ConditionCategory::Fog => ("FOG", "░"),
        ConditionCategory::Drizzle => ("DRZ", "☂"),
        ConditionCategory::Rain => ("RAN", "☔"),
        ConditionCategory::Snow => ("SNW", "❄"),
        ConditionCategory::Showers => ("SHW", "☂"),
        ConditionCategory::Thunderstorm => ("THN", "⚡"),
    }
}
