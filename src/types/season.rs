//! Season classification for observation batches.
//!
//! Months map to one of three fixed calendar seasons. Winter spans the year
//! boundary (October through February), so January and February are
//! attributed to the previous season year.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three fixed calendar seasons used for rollups.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Season {
    /// March through May.
    Summer,
    /// June through September.
    Monsoon,
    /// October through February of the following calendar year.
    Winter,
}

impl Season {
    /// Maps a calendar month (1-12) to its season. Total over all inputs:
    /// anything outside the summer and monsoon ranges is winter.
    pub fn of_month(month: u32) -> Season {
        match month {
            3..=5 => Season::Summer,
            6..=9 => Season::Monsoon,
            _ => Season::Winter,
        }
    }

    /// Number of distinct calendar months that must be present before a
    /// season may be rolled up.
    pub fn required_months(&self) -> usize {
        match self {
            Season::Summer => 3,
            Season::Monsoon => 4,
            Season::Winter => 5,
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Season::Summer => "Summer",
            Season::Monsoon => "Monsoon",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Identifies one season rollup: a season label plus the year it is
/// attributed to.
///
/// The season year differs from the calendar year only for January and
/// February, which belong to the winter that started the previous October.
///
/// # Examples
///
/// ```
/// use avigrid::{Season, SeasonKey};
///
/// assert_eq!(SeasonKey::of(2025, 1), SeasonKey { season: Season::Winter, year: 2024 });
/// assert_eq!(SeasonKey::of(2024, 10), SeasonKey { season: Season::Winter, year: 2024 });
/// assert_eq!(SeasonKey::of(2025, 7), SeasonKey { season: Season::Monsoon, year: 2025 });
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SeasonKey {
    pub season: Season,
    pub year: i32,
}

impl SeasonKey {
    /// Derives the season key a calendar (year, month) belongs to.
    pub fn of(year: i32, month: u32) -> SeasonKey {
        let season = Season::of_month(month);
        let year = if month <= 2 { year - 1 } else { year };
        SeasonKey { season, year }
    }

    /// File stem used for the seasonal artifact, e.g. `Winter_2024`.
    pub fn file_stem(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SeasonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.season, self.year)
    }
}
