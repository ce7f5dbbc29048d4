//! Raw input samples and timestamp helpers.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One time-stamped reading from a production or consumption source.
///
/// Production and consumption arrive as separate collections; each sample
/// usually carries only the field relevant to its source. Absent fields read as 0,
/// and so do values that fail to decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// `YYYY-MM-DD HH:MM[:SS]`.
    pub timestamp: String,
    #[serde(
        default,
        deserialize_with = "csv::invalid_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub production_kw: Option<f64>,
    #[serde(
        default,
        deserialize_with = "csv::invalid_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub consumption_kw: Option<f64>,
}

impl Sample {
    pub fn production(timestamp: impl Into<String>, kw: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            production_kw: Some(kw),
            consumption_kw: None,
        }
    }

    pub fn consumption(timestamp: impl Into<String>, kw: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            production_kw: None,
            consumption_kw: Some(kw),
        }
    }

    /// Production power, with missing or NaN values read as 0.
    pub fn production_kw(&self) -> f64 {
        or_zero(self.production_kw)
    }

    /// Consumption power, with missing or NaN values read as 0.
    pub fn consumption_kw(&self) -> f64 {
        or_zero(self.consumption_kw)
    }

    /// Whether this sample belongs to `date` (plain prefix match on the timestamp).
    pub fn is_on(&self, date: &str) -> bool {
        self.timestamp.starts_with(date)
    }
}

fn or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| !v.is_nan()).unwrap_or(0.0)
}

/// Returns the date part of a timestamp (everything before the first space).
pub fn extract_date(timestamp: &str) -> &str {
    timestamp.split(' ').next().unwrap_or("")
}

/// Returns `HH:MM` from a timestamp, or an empty string when there is no time part.
pub fn extract_time(timestamp: &str) -> &str {
    match timestamp.split_once(' ') {
        Some((_, time)) => time.get(..5).unwrap_or(time),
        None => "",
    }
}

/// Sorted distinct dates present in the samples.
pub fn available_dates(samples: &[Sample]) -> Vec<String> {
    samples
        .iter()
        .map(|s| extract_date(&s.timestamp))
        .filter(|d| !d.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_read_as_zero() {
        let s = Sample {
            timestamp: "2023-06-21 12:00".into(),
            ..Sample::default()
        };
        assert_eq!(s.production_kw(), 0.0);
        assert_eq!(s.consumption_kw(), 0.0);
    }

    #[test]
    fn nan_reads_as_zero() {
        let s = Sample::production("2023-06-21 12:00", f64::NAN);
        assert_eq!(s.production_kw(), 0.0);
    }

    #[test]
    fn time_is_first_five_chars_after_space() {
        assert_eq!(extract_time("2023-06-21 08:45:00"), "08:45");
        assert_eq!(extract_time("2023-06-21 08:45"), "08:45");
        assert_eq!(extract_time("2023-06-21 8:5"), "8:5");
        assert_eq!(extract_time("2023-06-21"), "");
    }

    #[test]
    fn date_is_prefix_before_space() {
        assert_eq!(extract_date("2023-06-21 08:45:00"), "2023-06-21");
        assert_eq!(extract_date("2023-06-21"), "2023-06-21");
    }

    #[test]
    fn prefix_match_selects_day() {
        let s = Sample::production("2023-06-21 08:45:00", 1.0);
        assert!(s.is_on("2023-06-21"));
        assert!(s.is_on("2023-06"));
        assert!(!s.is_on("2023-06-22"));
    }

    #[test]
    fn available_dates_are_sorted_and_distinct() {
        let samples = vec![
            Sample::production("2023-06-22 00:00", 0.0),
            Sample::production("2023-06-21 00:15", 0.0),
            Sample::production("2023-06-21 00:00", 0.0),
        ];
        assert_eq!(available_dates(&samples), vec!["2023-06-21", "2023-06-22"]);
    }
}
