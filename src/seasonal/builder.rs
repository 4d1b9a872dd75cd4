//! Build-once concatenation of monthly batches into seasonal artifacts.

use crate::ingest::error::IngestError;
use crate::ingest::loader::BatchLoader;
use crate::seasonal::error::SeasonError;
use crate::seasonal::store::SeasonStore;
use crate::types::batch::BatchId;
use crate::types::season::SeasonKey;
use log::{info, warn};
use polars::prelude::*;
use std::path::PathBuf;

/// Outcome of a seasonal build attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// This call wrote the artifact at the given path.
    Built(PathBuf),
    /// An artifact for the key already existed; nothing was read or written.
    SkippedExisting,
}

pub struct SeasonBuilder<'a> {
    loader: &'a BatchLoader,
    store: &'a SeasonStore,
}

impl<'a> SeasonBuilder<'a> {
    pub fn new(loader: &'a BatchLoader, store: &'a SeasonStore) -> SeasonBuilder<'a> {
        SeasonBuilder { loader, store }
    }

    /// Builds the seasonal artifact for `key` from the matching entries of
    /// `available`.
    ///
    /// If the artifact already exists the call is an idempotent no-op, even
    /// when new batches have since arrived for the key. Batches are
    /// concatenated in chronological order with their row order preserved.
    /// A batch file that vanished since scanning is treated as absent and
    /// logged; a schema-invalid batch aborts the build for this key without
    /// writing anything.
    pub fn build(
        &self,
        key: SeasonKey,
        available: &[BatchId],
    ) -> Result<BuildOutcome, SeasonError> {
        if self.store.exists(key) {
            info!("{key} already built, skipping");
            return Ok(BuildOutcome::SkippedExisting);
        }

        let mut matching: Vec<BatchId> = available
            .iter()
            .copied()
            .filter(|id| id.season_key() == key)
            .collect();
        matching.sort();
        matching.dedup();

        let mut frames = Vec::with_capacity(matching.len());
        for id in matching {
            match self.loader.load(id) {
                Ok(df) => frames.push(df.lazy()),
                Err(IngestError::BatchNotFound(path)) => {
                    warn!("Batch {id} missing at {}; treating as absent", path.display());
                }
                Err(e) => return Err(e.into()),
            }
        }

        if frames.is_empty() {
            return Err(SeasonError::NoData(key));
        }

        // Diagonal union: a month lacking one of the optional columns gets
        // nulls there instead of failing the concatenation.
        let args = UnionArgs {
            diagonal: true,
            ..Default::default()
        };
        let mut combined = concat(frames, args)
            .and_then(LazyFrame::collect)
            .map_err(|source| SeasonError::Concat { key, source })?;

        if self.store.write(key, &mut combined)? {
            let path = self.store.artifact_path(key);
            info!("Built seasonal artifact {} ({} rows)", path.display(), combined.height());
            Ok(BuildOutcome::Built(path))
        } else {
            Ok(BuildOutcome::SkippedExisting)
        }
    }
}
