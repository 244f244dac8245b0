use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::domain::weather::Units;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum UnitsArg {
    Celsius,
    Fahrenheit,
}

impl From<UnitsArg> for Units {
    fn from(value: UnitsArg) -> Self {
        match value {
            UnitsArg::Celsius => Units::Celsius,
            UnitsArg::Fahrenheit => Units::Fahrenheit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconMode {
    Unicode,
    Ascii,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser, Clone)]
#[command(
    name = "nimbus-weather",
    version,
    about = "Terminal weather widget with a timezone-aligned daily forecast"
)]
pub struct Cli {
    /// Temperature units
    #[arg(long, value_enum, default_value_t = UnitsArg::Celsius)]
    pub units: UnitsArg,

    /// Forecast days to show, today included (1..7)
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(1..=7))]
    pub days: u8,

    /// Latitude (requires --lon); skips IP-based detection
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude (requires --lat)
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Save the resolved location as the preferred one
    #[arg(long)]
    pub remember: bool,

    /// Clear the saved location before resolving
    #[arg(long)]
    pub forget: bool,

    /// Refresh interval in seconds
    #[arg(long, default_value_t = 600)]
    pub refresh_interval: u64,

    /// Animation frame rate (15..60)
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u8).range(15..=60))]
    pub fps: u8,

    /// Disable the cloud animation
    #[arg(long)]
    pub no_animation: bool,

    /// Force ASCII icons
    #[arg(long)]
    pub ascii_icons: bool,

    /// Print a forecast snapshot to stdout and exit (non-interactive)
    #[arg(long)]
    pub one_shot: bool,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Override the forecast API endpoint
    #[arg(long, hide = true)]
    pub forecast_url: Option<String>,

    /// Override the ipapi.co endpoint
    #[arg(long, hide = true)]
    pub ipapi_url: Option<String>,

    /// Override the ipwho.is endpoint
    #[arg(long, hide = true)]
    pub ipwho_url: Option<String>,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        match (self.lat, self.lon) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("--lat and --lon must be provided together")
            }
            (Some(lat), Some(lon))
                if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) =>
            {
                anyhow::bail!("coordinates out of range: {lat}, {lon}")
            }
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn icon_mode(&self) -> IconMode {
        if self.ascii_icons {
            IconMode::Ascii
        } else {
            IconMode::Unicode
        }
    }

    #[must_use]
    pub fn units(&self) -> Units {
        self.units.into()
    }

    #[must_use]
    pub fn max_days(&self) -> usize {
        usize::from(self.days)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, IconMode, UnitsArg};

    #[test]
    fn defaults_show_four_days_in_celsius() {
        let cli = Cli::parse_from(["nimbus-weather"]);
        assert_eq!(cli.units, UnitsArg::Celsius);
        assert_eq!(cli.max_days(), 4);
        assert_eq!(cli.refresh_interval, 600);
        assert_eq!(cli.icon_mode(), IconMode::Unicode);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn rejects_day_count_outside_range() {
        assert!(Cli::try_parse_from(["nimbus-weather", "--days", "0"]).is_err());
        assert!(Cli::try_parse_from(["nimbus-weather", "--days", "8"]).is_err());
        let cli = Cli::parse_from(["nimbus-weather", "--days", "7"]);
        assert_eq!(cli.max_days(), 7);
    }

    #[test]
    fn accepts_negative_coordinates() {
        let cli = Cli::parse_from(["nimbus-weather", "--lat", "-33.87", "--lon", "151.21"]);
        assert_eq!(cli.lat, Some(-33.87));
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn lat_without_lon_fails_validation() {
        let cli = Cli::parse_from(["nimbus-weather", "--lat", "10"]);
        let err = cli.validate().expect_err("expected pairing error");
        assert!(err.to_string().contains("--lat and --lon"));
    }

    #[test]
    fn out_of_range_coordinates_fail_validation() {
        let cli = Cli::parse_from(["nimbus-weather", "--lat", "91", "--lon", "0"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn ascii_flag_switches_icon_mode() {
        let cli = Cli::parse_from(["nimbus-weather", "--ascii-icons", "--units", "fahrenheit"]);
        assert_eq!(cli.icon_mode(), IconMode::Ascii);
        assert_eq!(cli.units(), crate::domain::weather::Units::Fahrenheit);
    }
}
