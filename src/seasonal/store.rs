//! Persistence of seasonal artifacts.
//!
//! Seasonal rollups are written exactly once per key. The store exposes the
//! existence check and the write separately; the write publishes atomically
//! (temp file in the destination directory, then a no-clobber rename), so two
//! builders racing on the same key cannot clobber or interleave an artifact —
//! one wins the rename and the other observes an idempotent skip.

use crate::seasonal::error::SeasonError;
use crate::types::season::SeasonKey;
use log::warn;
use polars::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub struct SeasonStore {
    seasons_dir: PathBuf,
}

impl SeasonStore {
    pub fn new(seasons_dir: &Path) -> SeasonStore {
        SeasonStore {
            seasons_dir: seasons_dir.to_path_buf(),
        }
    }

    /// Path of the seasonal artifact, e.g. `seasons/Winter_2024.csv`.
    pub fn artifact_path(&self, key: SeasonKey) -> PathBuf {
        self.seasons_dir.join(format!("{}.csv", key.file_stem()))
    }

    /// Whether an artifact for `key` has already been published.
    pub fn exists(&self, key: SeasonKey) -> bool {
        self.artifact_path(key).exists()
    }

    /// Publishes the seasonal artifact for `key`.
    ///
    /// Returns `Ok(true)` when this call wrote the artifact and `Ok(false)`
    /// when a concurrent writer published the key first; the existing
    /// artifact is never rewritten.
    pub fn write(&self, key: SeasonKey, df: &mut DataFrame) -> Result<bool, SeasonError> {
        std::fs::create_dir_all(&self.seasons_dir)
            .map_err(|e| SeasonError::DirCreation(self.seasons_dir.clone(), e))?;

        let path = self.artifact_path(key);

        // Temp file lives in the seasons directory so the rename stays on one
        // filesystem and is atomic.
        let mut temp = NamedTempFile::new_in(&self.seasons_dir)
            .map_err(|e| SeasonError::ArtifactIo(path.clone(), e))?;
        CsvWriter::new(temp.as_file_mut())
            .include_header(true)
            .finish(df)
            .map_err(|e| SeasonError::ArtifactWrite(path.clone(), e))?;

        match temp.persist_noclobber(&path) {
            Ok(_) => Ok(true),
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                warn!(
                    "Artifact for {} appeared while building; keeping the existing file",
                    key
                );
                Ok(false)
            }
            Err(e) => Err(SeasonError::ArtifactIo(path, e.error)),
        }
    }
}
