use ratatui::style::Color;

use crate::domain::weather::ConditionCategory;

#[must_use]
pub fn icon_color(category: ConditionCategory) -> Color {
    match category {
        ConditionCategory::Clear => Color::Yellow,
        ConditionCategory::PartlyCloudy => Color::LightYellow,
        ConditionCategory::Cloudy => Color::Gray,
        ConditionCategory::Fog => Color::DarkGray,
        ConditionCategory::Drizzle | ConditionCategory::Showers => Color::LightBlue,
        ConditionCategory::Rain => Color::Blue,
        ConditionCategory::Snow => Color::White,
        ConditionCategory::Thunderstorm => Color::LightRed,
    }
}

/// Colour band for a temperature in Celsius, independent of display units.
#[must_use]
pub fn temp_color(temp_c: f32) -> Color {
    if temp_c <= -8.0 {
        Color::LightBlue
    } else if temp_c <= 2.0 {
        Color::Cyan
    } else if temp_c <= 16.0 {
        Color::Green
    } else if temp_c <= 28.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}
