//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use solar_day::sample::Sample;
use solar_day::synthetic::{self, SyntheticData, SyntheticParams};

/// The summer solstice used across integration tests.
pub const DATE: &str = "2023-06-21";

/// Default synthetic parameters (one home, 5 kW peak, seed 42).
pub fn default_params() -> SyntheticParams {
    SyntheticParams {
        homes: 1,
        peak_kw: 5.0,
        production_noise: 0.15,
        consumption_noise: 0.1,
        seed: 42,
    }
}

/// Two synthetic days starting at [`DATE`].
pub fn synthetic_days() -> SyntheticData {
    let start = NaiveDate::from_ymd_opt(2023, 6, 21).unwrap_or_default();
    synthetic::generate(start, 2, &default_params())
}

/// A hand-written day with a morning deficit, a midday surplus and an evening deficit.
///
/// Returns `(production, consumption)` at 15-minute spacing.
pub fn handmade_day() -> (Vec<Sample>, Vec<Sample>) {
    let mut production = Vec::new();
    let mut consumption = Vec::new();
    for i in 0..96 {
        let ts = format!("{DATE} {:02}:{:02}", i / 4, (i % 4) * 15);
        let hour = i as f64 / 4.0;
        let solar = if (6.0..20.0).contains(&hour) {
            6.0 * (std::f64::consts::PI * (hour - 6.0) / 14.0).sin()
        } else {
            0.0
        };
        let load = if (17.0..22.0).contains(&hour) { 3.5 } else { 0.8 };
        production.push(Sample::production(ts.clone(), solar));
        consumption.push(Sample::consumption(ts, load));
    }
    (production, consumption)
}

/// A scratch directory under the system temp directory, unique per test name.
pub fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("solar-day-{}-{name}", std::process::id()));
    fs::create_dir_all(&dir).unwrap_or_else(|e| panic!("create {}: {e}", dir.display()));
    dir
}
