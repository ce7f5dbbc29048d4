use std::io::{self, Write};

use crate::sim::stats::DailyStats;
use crate::sim::types::DaySeries;

/// Writes one line per interval followed by the daily summary.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_day_report(
    out: &mut impl Write,
    date: &str,
    battery_capacity_kwh: f64,
    series: &DaySeries,
    stats: Option<&DailyStats>,
) -> io::Result<()> {
    writeln!(out, "Day {date}, battery {battery_capacity_kwh:.1} kWh, {} intervals", series.len())?;
    for interval in series.intervals() {
        writeln!(out, "{interval}")?;
    }
    match stats {
        Some(stats) => writeln!(out, "\n{stats}"),
        None => writeln!(out, "\nNo data for {date}."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Sample;
    use crate::sim::{aggregate, build};

    #[test]
    fn report_lists_intervals_and_summary() {
        let series = build(
            &[Sample::production("2023-06-21 12:00", 4.0)],
            &[Sample::consumption("2023-06-21 12:00", 1.0)],
            "2023-06-21",
            10.0,
        );
        let stats = aggregate(&series.production, &series.consumption, &series.network);
        let mut out = Vec::new();
        write_day_report(&mut out, "2023-06-21", 10.0, &series, stats.as_ref()).ok();
        let text = String::from_utf8(out).unwrap_or_default();
        assert!(text.contains("12:00"));
        assert!(text.contains("charging"));
        assert!(text.contains("Daily Summary"));
    }

    #[test]
    fn empty_day_says_so() {
        let mut out = Vec::new();
        write_day_report(&mut out, "2023-06-21", 0.0, &DaySeries::default(), None).ok();
        let text = String::from_utf8(out).unwrap_or_default();
        assert!(text.contains("No data for 2023-06-21"));
    }
}
