//! CSV and JSON export of a built day.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::sim::stats::DailyStats;
use crate::sim::types::DaySeries;

/// Column header for the per-interval CSV export.
const HEADER: &str = "timestamp,time,production_kw,consumption_kw,\
                      network_kw,battery_kw,battery_soc_pct";

/// Exports the day's series to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_series_csv(series: &DaySeries, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_series_csv(series, buf)
}

/// Writes the day's series as CSV, one row per interval, to any writer.
///
/// Values are written at full precision; rounding is left to whoever displays them.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_series_csv(series: &DaySeries, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for i in series.intervals() {
        wtr.write_record(&[
            i.timestamp.to_string(),
            i.time.to_string(),
            i.production_kw.to_string(),
            i.consumption_kw.to_string(),
            i.network_kw.to_string(),
            i.battery_kw.to_string(),
            i.battery_soc_pct.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// A built day and its statistics, as handed to a display layer.
#[derive(Debug, Serialize)]
pub struct DayReport<'a> {
    pub date: &'a str,
    pub battery_capacity_kwh: f64,
    pub series: &'a DaySeries,
    pub stats: Option<&'a DailyStats>,
}

/// Writes the report as pretty-printed JSON.
///
/// # Errors
///
/// Returns a `serde_json::Error` if serialization or writing fails.
pub fn write_json(report: &DayReport<'_>, writer: impl Write) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(writer, report)
}
