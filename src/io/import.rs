//! CSV import of production and consumption samples.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::sample::Sample;

/// Which value column a CSV file carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    Production,
    Consumption,
}

impl SampleKind {
    /// Header of the value column.
    pub fn column(self) -> &'static str {
        match self {
            Self::Production => "production_kw",
            Self::Consumption => "consumption_kw",
        }
    }
}

impl fmt::Display for SampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Production => "production",
            Self::Consumption => "consumption",
        })
    }
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot open \"{path}\": {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("{kind} CSV has no `{column}` column")]
    MissingColumn { kind: SampleKind, column: &'static str },

    #[error("{kind} CSV has no `timestamp` column")]
    MissingTimestamp { kind: SampleKind },

    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Reads samples from a file.
///
/// # Errors
///
/// Returns an [`ImportError`] if the file cannot be opened or read, or if it
/// lacks the expected columns.
pub fn load_samples(path: &Path, kind: SampleKind, date: Option<&str>) -> Result<Vec<Sample>, ImportError> {
    let file = File::open(path).map_err(|source| ImportError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let samples = read_samples(io::BufReader::new(file), kind, date)?;
    info!(path = %path.display(), %kind, n_samples = samples.len(), "loaded samples");
    Ok(samples)
}

/// Reads samples from a headered CSV (`timestamp,<kind column>`).
///
/// Rows are kept in file order. A row whose value is empty or not a number
/// is kept with the value absent so the day stays aligned; a row without a
/// timestamp, or that cannot be decoded at all, is skipped with a warning.
/// When `date` is given only rows whose timestamp starts with it are kept.
///
/// # Errors
///
/// Returns an [`ImportError`] on I/O failure or missing columns.
pub fn read_samples(reader: impl Read, kind: SampleKind, date: Option<&str>) -> Result<Vec<Sample>, ImportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if !headers.iter().any(|h| h == "timestamp") {
        return Err(ImportError::MissingTimestamp { kind });
    }
    if !headers.iter().any(|h| h == kind.column()) {
        return Err(ImportError::MissingColumn {
            kind,
            column: kind.column(),
        });
    }

    let mut samples = Vec::new();
    let mut n_skipped = 0_usize;
    let mut n_blank_values = 0_usize;

    for (line, row) in rdr.deserialize::<Sample>().enumerate() {
        let sample = match row {
            Ok(sample) => sample,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                warn!(line = line + 2, %err, "skipping undecodable row");
                n_skipped += 1;
                continue;
            }
        };
        if sample.timestamp.is_empty() {
            warn!(line = line + 2, "skipping row without timestamp");
            n_skipped += 1;
            continue;
        }
        if date.is_some_and(|d| !sample.is_on(d)) {
            continue;
        }

        let value = match kind {
            SampleKind::Production => sample.production_kw,
            SampleKind::Consumption => sample.consumption_kw,
        };
        if value.is_none() {
            n_blank_values += 1;
        }
        samples.push(sample);
    }

    if n_skipped > 0 || n_blank_values > 0 {
        warn!(%kind, n_skipped, n_blank_values, "imported with gaps");
    }
    Ok(samples)
}
