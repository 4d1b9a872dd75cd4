use crate::aggregate::error::AggregateError;
use crate::grid::error::GridError;
use crate::ingest::error::IngestError;
use crate::seasonal::error::SeasonError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AvigridError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Season(#[from] SeasonError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error("Failed to determine data directory")]
    DataDirResolution,

    #[error("Failed to create data directory '{0}'")]
    DataDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Data path exists but is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to read month directory '{0}'")]
    MonthsDirRead(PathBuf, #[source] std::io::Error),
}
