//! Rescales production so a typical day produces what a typical day consumes.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::sample::{Sample, extract_date};
use crate::sim::types::INTERVAL_HOURS;

#[derive(Debug, Error, PartialEq)]
pub enum ScaleError {
    #[error("no production energy to scale")]
    NoProduction,

    #[error("no consumption energy to match")]
    NoConsumption,
}

/// What a scaling pass did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleReport {
    pub scale_factor: f64,
    /// Average daily production after scaling (kWh).
    pub avg_daily_production_kwh: f64,
    pub avg_daily_consumption_kwh: f64,
    pub production_records: usize,
    pub consumption_records: usize,
    pub first_timestamp: Option<String>,
    pub last_timestamp: Option<String>,
}

/// Scales production by `avg daily consumption / avg daily production`.
///
/// Daily energy is the sum of a date's samples times the interval length;
/// averages are taken over the distinct dates of each collection.
///
/// # Errors
///
/// Returns a [`ScaleError`] when either side averages to zero (or less) energy.
pub fn scale_production_to_consumption(
    production: &[Sample],
    consumption: &[Sample],
) -> Result<(Vec<Sample>, ScaleReport), ScaleError> {
    let avg_production = match average_daily_kwh(production, Sample::production_kw) {
        Some(kwh) if kwh > 0.0 => kwh,
        _ => return Err(ScaleError::NoProduction),
    };
    let avg_consumption = match average_daily_kwh(consumption, Sample::consumption_kw) {
        Some(kwh) if kwh > 0.0 => kwh,
        _ => return Err(ScaleError::NoConsumption),
    };

    let factor = avg_consumption / avg_production;
    let scaled: Vec<Sample> = production
        .iter()
        .map(|s| Sample {
            production_kw: Some(s.production_kw() * factor),
            ..s.clone()
        })
        .collect();

    let timestamps = production.iter().map(|s| s.timestamp.as_str());
    let report = ScaleReport {
        scale_factor: factor,
        avg_daily_production_kwh: avg_production * factor,
        avg_daily_consumption_kwh: avg_consumption,
        production_records: production.len(),
        consumption_records: consumption.len(),
        first_timestamp: timestamps.clone().min().map(str::to_string),
        last_timestamp: timestamps.max().map(str::to_string),
    };
    info!(
        scale_factor = factor,
        avg_daily_production_kwh = report.avg_daily_production_kwh,
        avg_daily_consumption_kwh = avg_consumption,
        "scaled production"
    );
    Ok((scaled, report))
}

/// Mean daily energy over the distinct dates present, `None` without samples.
fn average_daily_kwh(samples: &[Sample], value: impl Fn(&Sample) -> f64) -> Option<f64> {
    let mut daily: BTreeMap<&str, f64> = BTreeMap::new();
    for s in samples {
        *daily.entry(extract_date(&s.timestamp)).or_default() += value(s);
    }
    if daily.is_empty() {
        return None;
    }
    let total: f64 = daily.values().map(|sum| sum * INTERVAL_HOURS).sum();
    Some(total / daily.len() as f64)
}
