use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Batch file '{0}' not found")]
    BatchNotFound(PathBuf),

    #[error("Failed to parse CSV data from '{path}'")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    // Schema violations abort the file's inclusion; they are not retried.
    #[error("Required column '{column}' missing from batch '{path}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Failed to rename column '{column}' in batch '{path}'")]
    ColumnRename {
        path: PathBuf,
        column: String,
        #[source]
        source: PolarsError,
    },
}
