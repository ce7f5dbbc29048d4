//! Daily summary statistics computed from a built day.

use std::fmt;

use serde::Serialize;

use super::types::{INTERVAL_HOURS, Point};

/// Energy total and peak of one power series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesStats {
    /// Energy over the day (kWh).
    pub total: f64,
    /// Highest sampled power (kW).
    pub max: f64,
    /// `HH:MM` of the first interval reaching `max`, empty if the series is empty.
    pub max_time: String,
}

/// Grid exchange over the day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkStats {
    /// Net energy exchanged (kWh; positive = injected more than drawn).
    pub balance: f64,
}

/// Summary figures for one day.
///
/// Computed post-hoc from the day's series so the figures always agree with
/// the plotted data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub production: SeriesStats,
    pub consumption: SeriesStats,
    pub network: NetworkStats,
    /// Share of consumption covered by local production (%, within `[0, 100]`).
    pub self_consumption: f64,
}

/// Computes the daily statistics, or `None` when there is no production series.
///
/// # Arguments
///
/// * `production` - Production series (kW)
/// * `consumption` - Consumption series (kW)
/// * `network` - Grid exchange series after battery action (kW)
pub fn aggregate(production: &[Point], consumption: &[Point], network: &[Point]) -> Option<DailyStats> {
    if production.is_empty() {
        return None;
    }

    let production = series_stats(production);
    let consumption = series_stats(consumption);
    let balance = energy_kwh(network.iter().map(|p| p.value));

    let injected_kwh = energy_kwh(network.iter().map(|p| p.value).filter(|v| *v > 0.0));
    let self_consumed_kwh = production.total - injected_kwh;
    let self_consumption = if consumption.total > 0.0 {
        self_consumed_kwh / consumption.total * 100.0
    } else {
        0.0
    };

    Some(DailyStats {
        production,
        consumption,
        network: NetworkStats { balance },
        self_consumption: self_consumption.clamp(0.0, 100.0),
    })
}

/// Sums power values and converts the sum to energy.
fn energy_kwh(values: impl Iterator<Item = f64>) -> f64 {
    values.sum::<f64>() * INTERVAL_HOURS
}

/// Total and peak of a series in one pass.
///
/// The first point attaining the maximum wins: later points replace it only
/// when strictly greater. Values are compared exactly, with no tolerance.
/// A later `+0.0` still replaces a `-0.0` maximum's value, not its time.
fn series_stats(series: &[Point]) -> SeriesStats {
    let mut sum = 0.0_f64;
    let mut max = f64::NEG_INFINITY;
    let mut max_time = "";

    for p in series {
        sum += p.value;
        if p.value > max {
            max = p.value;
            max_time = p.time.as_str();
        } else if p.value == max && max.is_sign_negative() && p.value.is_sign_positive() {
            max = p.value;
        }
    }

    SeriesStats {
        total: sum * INTERVAL_HOURS,
        max,
        max_time: max_time.to_string(),
    }
}

impl fmt::Display for DailyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Daily Summary ---")?;
        writeln!(
            f,
            "Production:        {:.2} kWh (peak {:.2} kW at {})",
            self.production.total, self.production.max, self.production.max_time
        )?;
        writeln!(
            f,
            "Consumption:       {:.2} kWh (peak {:.2} kW at {})",
            self.consumption.total, self.consumption.max, self.consumption.max_time
        )?;
        writeln!(f, "Grid balance:      {:+.2} kWh", self.network.balance)?;
        write!(f, "Self-consumption:  {:.1}%", self.self_consumption)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn series(values: &[f64]) -> Vec<Point> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                Point::new(&format!("2023-06-21 {:02}:{:02}", i / 4, (i % 4) * 15), v)
            })
            .collect()
    }

    #[test]
    fn empty_production_has_no_stats() {
        assert!(aggregate(&[], &series(&[1.0]), &series(&[1.0])).is_none());
    }

    #[test]
    fn totals_are_quarter_hour_energy() {
        let stats = aggregate(
            &series(&[4.0, 2.0]),
            &series(&[1.0, 1.0]),
            &series(&[3.0, 1.0]),
        );
        let stats = stats.as_ref();
        assert_eq!(stats.map(|s| s.production.total), Some(1.5));
        assert_eq!(stats.map(|s| s.consumption.total), Some(0.5));
        assert_eq!(stats.map(|s| s.network.balance), Some(1.0));
    }

    #[test]
    fn first_peak_wins_ties() {
        let stats = aggregate(&series(&[1.0, 3.0, 2.0, 3.0]), &series(&[0.0; 4]), &series(&[0.0; 4]));
        let stats = stats.as_ref();
        assert_eq!(stats.map(|s| s.production.max), Some(3.0));
        assert_eq!(stats.map(|s| s.production.max_time.as_str()), Some("00:15"));
    }

    #[test]
    fn positive_zero_outranks_negative_zero() {
        let stats = aggregate(&series(&[-0.0, 0.0]), &series(&[0.0; 2]), &series(&[0.0; 2]));
        let stats = stats.as_ref();
        assert_eq!(stats.map(|s| s.production.max.is_sign_positive()), Some(true));
        assert_eq!(stats.map(|s| s.production.max_time.as_str()), Some("00:00"));

        let stats = aggregate(&series(&[-0.0]), &series(&[0.0]), &series(&[0.0]));
        assert_eq!(stats.map(|s| s.production.max.is_sign_negative()), Some(true));
    }

    #[test]
    fn negative_only_series_still_reports_peak() {
        let stats = aggregate(&series(&[-2.0, -1.0]), &series(&[0.0, 0.0]), &series(&[0.0, 0.0]));
        assert_eq!(stats.as_ref().map(|s| s.production.max), Some(-1.0));
    }

    #[test]
    fn empty_consumption_has_no_peak_time() {
        let stats = aggregate(&series(&[1.0]), &[], &[]);
        let stats = stats.as_ref();
        assert_eq!(stats.map(|s| s.consumption.max), Some(f64::NEG_INFINITY));
        assert_eq!(stats.map(|s| s.consumption.max_time.as_str()), Some(""));
        assert_eq!(stats.map(|s| s.self_consumption), Some(0.0));
    }

    #[test]
    fn self_consumption_excludes_injection() {
        // production 8 kWh, injected 2 kWh, consumption 12 kWh -> 50 %
        let stats = aggregate(
            &series(&[16.0, 16.0]),
            &series(&[24.0, 24.0]),
            &series(&[8.0, -16.0]),
        );
        assert_relative_eq!(stats.map(|s| s.self_consumption).unwrap_or(-1.0), 50.0);
    }

    #[test]
    fn self_consumption_is_clamped() {
        // Upstream anomaly: more self-consumed than consumed.
        let high = aggregate(&series(&[10.0]), &series(&[1.0]), &series(&[0.0]));
        assert_eq!(high.map(|s| s.self_consumption), Some(100.0));

        let low = aggregate(&series(&[1.0]), &series(&[1.0]), &series(&[10.0]));
        assert_eq!(low.map(|s| s.self_consumption), Some(0.0));
    }

    #[test]
    fn zero_consumption_gives_zero_self_consumption() {
        let stats = aggregate(&series(&[5.0]), &series(&[0.0]), &series(&[5.0]));
        assert_eq!(stats.map(|s| s.self_consumption), Some(0.0));
    }

    #[test]
    fn serializes_with_camel_case_field_names() {
        let stats = aggregate(&series(&[1.0]), &series(&[1.0]), &series(&[0.0]));
        let json = stats.map(|s| serde_json::to_string(&s).unwrap_or_default()).unwrap_or_default();
        assert!(json.contains("\"maxTime\""));
        assert!(json.contains("\"selfConsumption\""));
        assert!(json.contains("\"balance\""));
    }

    #[test]
    fn display_does_not_panic() {
        let stats = aggregate(&series(&[1.0]), &series(&[1.0]), &series(&[0.0]));
        let s = stats.map(|s| s.to_string()).unwrap_or_default();
        assert!(s.contains("Self-consumption"));
    }
}
