//! Core simulation types: interval timing, output points, and the day series bundle.

use std::fmt;

use serde::Serialize;

use crate::devices::battery::BatteryMode;
use crate::sample::extract_time;

/// Duration of one sampled interval in hours (15-minute cadence).
pub const INTERVAL_HOURS: f64 = 0.25;

/// Number of intervals in one calendar day.
pub const INTERVALS_PER_DAY: usize = 96;

/// One value of an output series, tagged with its time of day and source timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    /// Local time of day, `HH:MM`.
    pub time: String,
    /// Power in kW, or percent for state-of-charge series.
    pub value: f64,
    /// Timestamp of the source sample.
    pub timestamp: String,
}

impl Point {
    /// Creates a point, deriving `time` from the timestamp.
    pub fn new(timestamp: &str, value: f64) -> Self {
        Self {
            time: extract_time(timestamp).to_string(),
            value,
            timestamp: timestamp.to_string(),
        }
    }
}

/// The five synchronized series produced for one day.
///
/// All vectors have the same length and ordering, driven by the production samples.
///
/// # Sign conventions
/// - `network`: positive = injection into the grid, negative = draw from the grid
/// - `battery`: negative = charging, positive = discharging
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySeries {
    /// Solar production (kW).
    pub production: Vec<Point>,
    /// Household consumption (kW).
    pub consumption: Vec<Point>,
    /// Grid exchange after battery action (kW).
    pub network: Vec<Point>,
    /// Battery power (kW).
    pub battery: Vec<Point>,
    /// Battery state of charge before each interval's action (%).
    pub battery_soc: Vec<Point>,
}

impl DaySeries {
    /// Creates empty series with room for `n` intervals each.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            production: Vec::with_capacity(n),
            consumption: Vec::with_capacity(n),
            network: Vec::with_capacity(n),
            battery: Vec::with_capacity(n),
            battery_soc: Vec::with_capacity(n),
        }
    }

    /// Number of intervals in the day.
    pub fn len(&self) -> usize {
        self.production.len()
    }

    pub fn is_empty(&self) -> bool {
        self.production.is_empty()
    }

    /// Iterates over the day one interval at a time.
    pub fn intervals(&self) -> impl Iterator<Item = Interval<'_>> {
        (0..self.len()).map(move |i| Interval {
            timestamp: &self.production[i].timestamp,
            time: &self.production[i].time,
            production_kw: self.production[i].value,
            consumption_kw: self.consumption[i].value,
            network_kw: self.network[i].value,
            battery_kw: self.battery[i].value,
            battery_soc_pct: self.battery_soc[i].value,
        })
    }
}

/// Row view across all five series at one interval.
#[derive(Debug, Clone, Copy)]
pub struct Interval<'a> {
    pub timestamp: &'a str,
    pub time: &'a str,
    pub production_kw: f64,
    pub consumption_kw: f64,
    pub network_kw: f64,
    pub battery_kw: f64,
    pub battery_soc_pct: f64,
}

impl Interval<'_> {
    /// What the battery was doing during this interval.
    pub fn battery_mode(&self) -> BatteryMode {
        BatteryMode::from_power_kw(self.battery_kw)
    }
}

impl fmt::Display for Interval<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | prod={:>7.2} kW  cons={:>7.2} kW | grid={:>7.2} kW | \
             bat={:>6.2} kW {:<11} (SoC={:.1}%)",
            self.time,
            self.production_kw,
            self.consumption_kw,
            self.network_kw,
            self.battery_kw,
            self.battery_mode().to_string(),
            self.battery_soc_pct,
        )
    }
}
