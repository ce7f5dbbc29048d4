//! Synthetic production and consumption samples at 15-minute cadence.

use chrono::{NaiveDate, TimeDelta};

use crate::devices::{Device, DeviceContext, HouseholdLoad, SolarProfile};
use crate::sample::Sample;
use crate::sim::types::INTERVALS_PER_DAY;

/// Seed offset for the consumption RNG to avoid correlation with production.
const CONSUMPTION_SEED_OFFSET: u64 = 57;

/// Timestamp layout shared with the CSV files.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parameters for a synthetic neighbourhood.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticParams {
    pub homes: u32,
    pub peak_kw: f64,
    pub production_noise: f64,
    pub consumption_noise: f64,
    pub seed: u64,
}

/// Production and consumption samples for consecutive days.
#[derive(Debug, Clone, Default)]
pub struct SyntheticData {
    pub production: Vec<Sample>,
    pub consumption: Vec<Sample>,
}

/// Generates `days` days of samples starting at `start`.
///
/// Every day has [`INTERVALS_PER_DAY`] samples on each side, timestamps
/// formatted `YYYY-MM-DD HH:MM:SS`. Output is fully determined by `params.seed`.
pub fn generate(start: NaiveDate, days: u32, params: &SyntheticParams) -> SyntheticData {
    let mut pv = SolarProfile::new(params.peak_kw, params.production_noise, params.seed);
    let mut load = HouseholdLoad::new(
        params.homes,
        params.consumption_noise,
        params.seed.wrapping_add(CONSUMPTION_SEED_OFFSET),
    );

    let n = INTERVALS_PER_DAY * days as usize;
    let mut data = SyntheticData {
        production: Vec::with_capacity(n),
        consumption: Vec::with_capacity(n),
    };

    let first = start.and_time(chrono::NaiveTime::MIN);
    for i in 0..n {
        let at = first + TimeDelta::minutes(15 * i as i64);
        let context = DeviceContext::new(at);
        let timestamp = at.format(TIMESTAMP_FORMAT).to_string();

        data.production.push(Sample::production(timestamp.clone(), pv.power_kw(&context)));
        data.consumption.push(Sample::consumption(timestamp, load.power_kw(&context)));
    }
    data
}
