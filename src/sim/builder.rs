//! Series builder: aligns one day of samples and runs the battery through it.

use std::collections::HashMap;

use tracing::debug;

use crate::devices::Battery;
use crate::sample::Sample;

use super::power_balance::net_power_kw;
use super::types::{DaySeries, Point};

/// Builds the production, consumption, network, battery and state-of-charge
/// series for `date`.
///
/// Production samples drive the output: their order is kept and each one
/// yields exactly one point per series. Consumption is matched by exact
/// timestamp (the first sample wins on duplicates) and reads as 0 when absent.
/// A `battery_capacity_kwh` of 0 or less disables the battery entirely.
///
/// # Arguments
///
/// * `production` - Production samples, any number of days
/// * `consumption` - Consumption samples, any number of days
/// * `date` - Day to build, matched as a prefix of each timestamp
/// * `battery_capacity_kwh` - Battery capacity (kWh)
pub fn build(
    production: &[Sample],
    consumption: &[Sample],
    date: &str,
    battery_capacity_kwh: f64,
) -> DaySeries {
    let consumption_by_ts = index_consumption(consumption, date);
    let day: Vec<&Sample> = production.iter().filter(|s| s.is_on(date)).collect();

    let mut battery = Battery::new(battery_capacity_kwh);
    let mut series = DaySeries::with_capacity(day.len());

    for sample in day {
        let ts = sample.timestamp.as_str();
        let production_kw = sample.production_kw();
        let consumption_kw = consumption_by_ts.get(ts).copied().unwrap_or(0.0);
        let net_kw = net_power_kw(production_kw, consumption_kw);

        let (battery_kw, soc_pct, network_kw) = match battery.as_mut() {
            Some(battery) => {
                let d = battery.dispatch(net_kw);
                (d.battery_kw, d.soc_pct_before, d.network_kw)
            }
            None => (0.0, 0.0, net_kw),
        };

        series.production.push(Point::new(ts, production_kw));
        series.consumption.push(Point::new(ts, consumption_kw));
        series.network.push(Point::new(ts, network_kw));
        series.battery.push(Point::new(ts, battery_kw));
        series.battery_soc.push(Point::new(ts, soc_pct));
    }

    debug!(
        date,
        intervals = series.len(),
        final_soc_kwh = battery.as_ref().map(|b| b.soc_kwh),
        "built day series"
    );
    series
}

/// Consumption power by timestamp for one day; the first sample per timestamp wins.
fn index_consumption<'a>(consumption: &'a [Sample], date: &str) -> HashMap<&'a str, f64> {
    let mut index = HashMap::with_capacity(consumption.len());
    for sample in consumption.iter().filter(|s| s.is_on(date)) {
        index
            .entry(sample.timestamp.as_str())
            .or_insert_with(|| sample.consumption_kw());
    }
    index
}
