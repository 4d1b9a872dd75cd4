//! Structured identifiers for monthly observation batches.
//!
//! A batch is identified by its (year, month) pair. The month-name file stem
//! used by the artifact layout (`March_2025.csv`) is derived from and parsed
//! into this identifier at the filesystem boundary, so nothing downstream
//! works with display names.

use crate::types::season::SeasonKey;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Identifier of one monthly batch of observations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct BatchId {
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
}

impl BatchId {
    pub fn new(year: i32, month: u32) -> BatchId {
        BatchId { year, month }
    }

    /// The season rollup this batch belongs to.
    pub fn season_key(&self) -> SeasonKey {
        SeasonKey::of(self.year, self.month)
    }

    /// File stem of the batch artifact, e.g. `March_2025`.
    pub fn file_stem(&self) -> String {
        self.to_string()
    }

    /// Parses a batch identifier back out of an artifact file stem such as
    /// `February_2026`.
    pub fn from_file_stem(stem: &str) -> Result<BatchId, ParseBatchIdError> {
        let (month_name, year) = stem
            .split_once('_')
            .ok_or_else(|| ParseBatchIdError::MissingSeparator(stem.to_string()))?;
        let date = NaiveDate::parse_from_str(&format!("{month_name} 01 {year}"), "%B %d %Y")
            .map_err(|source| ParseBatchIdError::Unparseable {
                stem: stem.to_string(),
                source,
            })?;
        Ok(BatchId {
            year: date.year(),
            month: date.month(),
        })
    }

    fn month_name(&self) -> &'static str {
        self.month
            .checked_sub(1)
            .and_then(|i| MONTH_NAMES.get(i as usize))
            .copied()
            .unwrap_or("Unknown")
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.month_name(), self.year)
    }
}

#[derive(Debug, Error)]
pub enum ParseBatchIdError {
    #[error("Batch file stem '{0}' has no '_' separating month name and year")]
    MissingSeparator(String),

    #[error("Batch file stem '{stem}' does not name a month and year")]
    Unparseable {
        stem: String,
        #[source]
        source: chrono::ParseError,
    },
}
