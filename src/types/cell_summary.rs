//! Per-cell aggregation results.

use serde::{Deserialize, Serialize};

/// One ranked category value with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedValue {
    pub value: String,
    pub count: u32,
}

/// Aggregated statistics for one grid cell.
///
/// Top lists hold at most five entries, ordered by descending count with ties
/// broken lexicographically on the value. A cell with no observations carries
/// a zero count and empty lists rather than being absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSummary {
    pub grid_id: i64,
    pub observation_count: u32,
    pub top_species: Vec<RankedValue>,
    pub top_habitat: Vec<RankedValue>,
    pub top_migratory: Vec<RankedValue>,
    pub top_protocol: Vec<RankedValue>,
}

impl CellSummary {
    pub(crate) fn empty(grid_id: i64) -> CellSummary {
        CellSummary {
            grid_id,
            observation_count: 0,
            top_species: Vec::new(),
            top_habitat: Vec::new(),
            top_migratory: Vec::new(),
            top_protocol: Vec::new(),
        }
    }
}

/// Result of one grid aggregation run over a batch or season.
///
/// `cells` covers every cell of the reference grid, sorted by grid id.
/// Observations whose point matched no cell (or that carried no coordinates)
/// are counted in `unassigned`, so cell counts plus `unassigned` always equal
/// `total_observations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSummary {
    pub cells: Vec<CellSummary>,
    pub unassigned: u32,
    pub total_observations: u32,
}

/// Scalars backing the textual summary of a batch or season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub total_observations: usize,
    /// Count of distinct scientific names, nulls excluded.
    pub species_richness: usize,
}
