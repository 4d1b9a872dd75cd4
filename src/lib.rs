mod aggregate;
mod avigrid;
mod error;
mod grid;
mod ingest;
mod seasonal;
mod summary;
mod types;
mod utils;

pub use error::AvigridError;

pub use avigrid::*;

pub use aggregate::error::AggregateError;
pub use aggregate::spatial::{GridAggregator, TOP_VALUES_PER_CELL};
pub use grid::error::GridError;
pub use grid::reference::{GridCell, ReferenceGrid};
pub use ingest::error::IngestError;
pub use ingest::loader::BatchLoader;
pub use seasonal::builder::{BuildOutcome, SeasonBuilder};
pub use seasonal::completeness::{season_completeness, CompletenessReport, PendingSeason};
pub use seasonal::error::SeasonError;
pub use seasonal::store::SeasonStore;
pub use summary::assembler::{report_totals, SummaryAssembler};

pub use types::batch::{BatchId, ParseBatchIdError};
pub use types::cell_summary::{CellSummary, GridSummary, RankedValue, ReportTotals};
pub use types::observation::Observation;
pub use types::season::{Season, SeasonKey};
