use crate::ingest::error::IngestError;
use crate::types::season::SeasonKey;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeasonError {
    // Non-fatal: the key is retried on a later run once data exists.
    #[error("No monthly data found for {0}")]
    NoData(SeasonKey),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("Failed to concatenate monthly batches for {key}")]
    Concat {
        key: SeasonKey,
        #[source]
        source: PolarsError,
    },

    #[error("Failed to create seasons directory '{0}'")]
    DirCreation(PathBuf, #[source] std::io::Error),

    #[error("I/O error writing seasonal artifact '{0}'")]
    ArtifactIo(PathBuf, #[source] std::io::Error),

    #[error("Encoding error writing seasonal artifact '{0}'")]
    ArtifactWrite(PathBuf, #[source] PolarsError),
}
