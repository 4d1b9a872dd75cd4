use crate::ingest::error::IngestError;
use crate::types::batch::BatchId;
use crate::types::observation::{COLUMN_ALIASES, REQUIRED_COLUMNS};
use log::info;
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// Reads monthly batch CSV files and normalizes their schema.
pub struct BatchLoader {
    months_dir: PathBuf,
}

impl BatchLoader {
    pub fn new(months_dir: &Path) -> BatchLoader {
        BatchLoader {
            months_dir: months_dir.to_path_buf(),
        }
    }

    /// Path the batch artifact is expected at, e.g. `months/March_2025.csv`.
    pub fn batch_path(&self, id: BatchId) -> PathBuf {
        self.months_dir.join(format!("{}.csv", id.file_stem()))
    }

    /// Loads one monthly batch into a DataFrame with the canonical schema.
    pub fn load(&self, id: BatchId) -> Result<DataFrame, IngestError> {
        self.load_path(&self.batch_path(id))
    }

    /// Loads any batch-shaped CSV artifact (monthly or seasonal) and runs it
    /// through schema normalization.
    pub fn load_path(&self, path: &Path) -> Result<DataFrame, IngestError> {
        if !path.exists() {
            return Err(IngestError::BatchNotFound(path.to_path_buf()));
        }

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(|source| IngestError::CsvRead {
                path: path.to_path_buf(),
                source,
            })?
            .finish()
            .map_err(|source| IngestError::CsvRead {
                path: path.to_path_buf(),
                source,
            })?;

        let df = normalize_schema(df, path)?;
        info!("Loaded {} rows from {}", df.height(), path.display());
        Ok(df)
    }
}

/// Canonicalizes provider column names and verifies the required schema.
///
/// Runs once at ingestion so no downstream consumer has to know about raw
/// provider field names. An alias is only applied when the canonical column
/// is not already present.
pub(crate) fn normalize_schema(
    mut df: DataFrame,
    path: &Path,
) -> Result<DataFrame, IngestError> {
    for (alias, canonical) in COLUMN_ALIASES {
        if df.column(alias).is_ok() && df.column(canonical).is_err() {
            df.rename(alias, canonical.into())
                .map_err(|source| IngestError::ColumnRename {
                    path: path.to_path_buf(),
                    column: alias.to_string(),
                    source,
                })?;
        }
    }

    for column in REQUIRED_COLUMNS {
        if df.column(column).is_err() {
            return Err(IngestError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            });
        }
    }

    Ok(df)
}
