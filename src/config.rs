//! TOML-based day configuration and preset definitions.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::synthetic::SyntheticParams;

/// Upper bound on `synthetic.days`.
pub const MAX_SYNTHETIC_DAYS: u32 = 366;

/// Layout of [`DaySection::date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Top-level configuration parsed from TOML.
///
/// All fields have defaults matching the `home_battery` preset. Load from
/// TOML with [`DayConfig::from_toml_file`] or use [`DayConfig::home_battery`]
/// for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DayConfig {
    /// Which day to simulate.
    #[serde(default)]
    pub day: DaySection,
    /// Battery parameters.
    #[serde(default)]
    pub battery: BatterySection,
    /// CSV sample sources; synthetic samples are used when absent.
    #[serde(default)]
    pub data: DataSection,
    /// Synthetic sample parameters.
    #[serde(default)]
    pub synthetic: SyntheticSection,
    /// Production rescaling.
    #[serde(default)]
    pub scaling: ScalingSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DaySection {
    /// `YYYY-MM-DD`.
    pub date: String,
}

impl Default for DaySection {
    fn default() -> Self {
        Self {
            date: "2023-06-21".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatterySection {
    /// Total energy capacity (kWh); 0 disables the battery.
    pub capacity_kwh: f64,
}

impl Default for BatterySection {
    fn default() -> Self {
        Self { capacity_kwh: 10.0 }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataSection {
    /// CSV with `timestamp,production_kw`.
    pub production_csv: Option<PathBuf>,
    /// CSV with `timestamp,consumption_kw`.
    pub consumption_csv: Option<PathBuf>,
}

/// Synthetic neighbourhood parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyntheticSection {
    /// Number of homes aggregated on the consumption side.
    pub homes: u32,
    /// Clear-sky noon production on the solstice (kW).
    pub peak_kw: f64,
    /// Standard deviation of the cloud noise factor.
    pub production_noise: f64,
    /// Standard deviation of the consumption noise factor.
    pub consumption_noise: f64,
    /// Number of days generated, starting at `day.date`.
    pub days: u32,
    /// Master random seed.
    pub seed: u64,
}

impl Default for SyntheticSection {
    fn default() -> Self {
        Self {
            homes: 1,
            peak_kw: 5.0,
            production_noise: 0.15,
            consumption_noise: 0.1,
            days: 1,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScalingSection {
    /// Rescale production so average daily production equals average daily consumption.
    pub scale_production: bool,
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.capacity_kwh"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl DayConfig {
    /// Returns the default scenario: one home with a 10 kWh battery.
    pub fn home_battery() -> Self {
        Self::default()
    }

    /// Returns the same home without a battery.
    pub fn no_battery() -> Self {
        Self {
            battery: BatterySection { capacity_kwh: 0.0 },
            ..Self::default()
        }
    }

    /// Returns a 50-home neighbourhood with a shared 100 kWh battery.
    pub fn neighbourhood() -> Self {
        Self {
            battery: BatterySection {
                capacity_kwh: 100.0,
            },
            synthetic: SyntheticSection {
                homes: 50,
                peak_kw: 80.0,
                days: 7,
                ..SyntheticSection::default()
            },
            scaling: ScalingSection {
                scale_production: true,
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["home_battery", "no_battery", "neighbourhood"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "home_battery" => Ok(Self::home_battery()),
            "no_battery" => Ok(Self::no_battery()),
            "neighbourhood" => Ok(Self::neighbourhood()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// The configured day, if it is a zero-padded `YYYY-MM-DD` date.
    ///
    /// Unpadded forms such as `2023-06-1` parse but are rejected: the day is
    /// matched as a timestamp prefix and would select several days.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.day.date, DATE_FORMAT)
            .ok()
            .filter(|d| d.format(DATE_FORMAT).to_string() == self.day.date)
    }

    /// Whether samples come from CSV files rather than the synthetic generator.
    pub fn uses_csv(&self) -> bool {
        self.data.production_csv.is_some()
    }

    pub fn synthetic_params(&self) -> SyntheticParams {
        let s = &self.synthetic;
        SyntheticParams {
            homes: s.homes,
            peak_kw: s.peak_kw,
            production_noise: s.production_noise,
            consumption_noise: s.consumption_noise,
            seed: s.seed,
        }
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.date().is_none() {
            errors.push(ConfigError::new(
                "day.date",
                format!("must be a YYYY-MM-DD date, got \"{}\"", self.day.date),
            ));
        }

        let capacity = self.battery.capacity_kwh;
        if !capacity.is_finite() || capacity < 0.0 {
            errors.push(ConfigError::new("battery.capacity_kwh", "must be a finite value >= 0"));
        }

        let d = &self.data;
        if d.production_csv.is_some() != d.consumption_csv.is_some() {
            errors.push(ConfigError::new(
                "data",
                "production_csv and consumption_csv must be given together",
            ));
        }

        let s = &self.synthetic;
        if s.homes == 0 {
            errors.push(ConfigError::new("synthetic.homes", "must be > 0"));
        }
        if s.days == 0 || s.days > MAX_SYNTHETIC_DAYS {
            errors.push(ConfigError::new(
                "synthetic.days",
                format!("must be in [1, {MAX_SYNTHETIC_DAYS}]"),
            ));
        }
        if !s.peak_kw.is_finite() || s.peak_kw < 0.0 {
            errors.push(ConfigError::new("synthetic.peak_kw", "must be a finite value >= 0"));
        }
        if !(0.0..1.0).contains(&s.production_noise) {
            errors.push(ConfigError::new("synthetic.production_noise", "must be in [0.0, 1.0)"));
        }
        if !(0.0..1.0).contains(&s.consumption_noise) {
            errors.push(ConfigError::new("synthetic.consumption_noise", "must be in [0.0, 1.0)"));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preset_valid() {
        let cfg = DayConfig::home_battery();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "default should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_unknown() {
        let err = DayConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let msg = err.err().map(|e| e.message).unwrap_or_default();
        assert!(msg.contains("unknown preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in DayConfig::PRESETS {
            let cfg = DayConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(DayConfig::validate).unwrap_or_default();
            assert!(errors.is_empty(), "preset \"{name}\" should be valid: {errors:?}");
        }
    }

    #[test]
    fn no_battery_has_zero_capacity() {
        assert_eq!(DayConfig::no_battery().battery.capacity_kwh, 0.0);
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[day]
date = "2024-01-15"

[battery]
capacity_kwh = 13.5

[data]
production_csv = "data/solar_production.csv"
consumption_csv = "data/consumption.csv"

[synthetic]
homes = 3
peak_kw = 9.0
production_noise = 0.2
consumption_noise = 0.05
days = 2
seed = 7

[scaling]
scale_production = true
"#;
        let cfg = DayConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.battery.capacity_kwh), Some(13.5));
        assert_eq!(cfg.as_ref().and_then(DayConfig::date), NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(cfg.as_ref().map(DayConfig::uses_csv), Some(true));
        assert_eq!(cfg.as_ref().map(|c| c.scaling.scale_production), Some(true));
        assert_eq!(cfg.as_ref().map(|c| c.synthetic_params().homes), Some(3));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[battery]
capacity_kwh = 10.0
max_power_kw = 5.0
"#;
        assert!(DayConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[battery]
capacity_kwh = 0.0
"#;
        let cfg = DayConfig::from_toml_str(toml).ok();
        assert_eq!(cfg.as_ref().map(|c| c.battery.capacity_kwh), Some(0.0));
        assert_eq!(cfg.as_ref().map(|c| c.day.date.as_str()), Some("2023-06-21"));
        assert_eq!(cfg.as_ref().map(|c| c.synthetic.seed), Some(42));
    }

    #[test]
    fn validation_catches_bad_date() {
        let mut cfg = DayConfig::home_battery();
        cfg.day.date = "21/06/2023".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "day.date"));
    }

    #[test]
    fn validation_catches_unpadded_date() {
        let mut cfg = DayConfig::home_battery();
        cfg.day.date = "2023-06-1".to_string();
        assert!(cfg.date().is_none());
        assert!(cfg.validate().iter().any(|e| e.field == "day.date"));
    }

    #[test]
    fn validation_catches_negative_capacity() {
        let mut cfg = DayConfig::home_battery();
        cfg.battery.capacity_kwh = -1.0;
        assert!(cfg.validate().iter().any(|e| e.field == "battery.capacity_kwh"));
    }

    #[test]
    fn validation_catches_unpaired_csv() {
        let mut cfg = DayConfig::home_battery();
        cfg.data.production_csv = Some(PathBuf::from("solar.csv"));
        assert!(cfg.validate().iter().any(|e| e.field == "data"));
    }

    #[test]
    fn validation_catches_zero_homes_and_days() {
        let mut cfg = DayConfig::home_battery();
        cfg.synthetic.homes = 0;
        cfg.synthetic.days = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "synthetic.homes"));
        assert!(errors.iter().any(|e| e.field == "synthetic.days"));
    }

    #[test]
    fn validation_catches_too_many_days() {
        let mut cfg = DayConfig::home_battery();
        cfg.synthetic.days = MAX_SYNTHETIC_DAYS;
        assert!(cfg.validate().is_empty());
        cfg.synthetic.days = MAX_SYNTHETIC_DAYS + 1;
        assert!(cfg.validate().iter().any(|e| e.field == "synthetic.days"));
    }

    #[test]
    fn validation_catches_noise_out_of_range() {
        let mut cfg = DayConfig::home_battery();
        cfg.synthetic.production_noise = 1.5;
        assert!(cfg.validate().iter().any(|e| e.field == "synthetic.production_noise"));
    }

    #[test]
    fn error_display_names_field() {
        let e = ConfigError::new("battery.capacity_kwh", "must be >= 0");
        assert_eq!(e.to_string(), "config error: battery.capacity_kwh: must be >= 0");
    }
}
