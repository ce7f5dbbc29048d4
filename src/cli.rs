//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::DayConfig;

/// Simulates one day of solar production, household consumption and a home battery.
///
/// Without `--config` or `--preset` the `home_battery` preset is used. Flags
/// override the matching configuration values.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Load configuration from a TOML file.
    #[arg(long, env = "SOLAR_DAY_CONFIG", conflicts_with = "preset")]
    pub config: Option<PathBuf>,

    /// Use a built-in preset (home_battery, no_battery, neighbourhood).
    #[arg(long)]
    pub preset: Option<String>,

    /// Day to simulate, `YYYY-MM-DD`.
    #[arg(long)]
    pub date: Option<String>,

    /// Battery capacity in kWh; 0 disables the battery.
    #[arg(long = "capacity-kwh", allow_negative_numbers = true)]
    pub capacity_kwh: Option<f64>,

    /// Production CSV (`timestamp,production_kw`).
    #[arg(long, requires = "consumption")]
    pub production: Option<PathBuf>,

    /// Consumption CSV (`timestamp,consumption_kw`).
    #[arg(long, requires = "production")]
    pub consumption: Option<PathBuf>,

    /// Export the day's series to CSV.
    #[arg(long = "series-out")]
    pub series_out: Option<PathBuf>,

    /// Print series and statistics as JSON instead of the text report.
    #[arg(long)]
    pub json: bool,

    /// List the dates present in the production data and exit.
    #[arg(long = "list-dates")]
    pub list_dates: bool,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Applies command-line overrides on top of a loaded configuration.
    pub fn apply_overrides(&self, config: &mut DayConfig) {
        if let Some(date) = &self.date {
            config.day.date.clone_from(date);
        }
        if let Some(capacity_kwh) = self.capacity_kwh {
            config.battery.capacity_kwh = capacity_kwh;
        }
        if let (Some(production), Some(consumption)) = (&self.production, &self.consumption) {
            config.data.production_csv = Some(production.clone());
            config.data.consumption_csv = Some(consumption.clone());
        }
    }
}
