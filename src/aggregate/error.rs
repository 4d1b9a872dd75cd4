use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("Required column '{0}' missing from observation data")]
    MissingField(String),

    #[error("Failed processing observation data: {0}")]
    Frame(#[from] PolarsError),
}
