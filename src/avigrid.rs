//! The main entry point for running the observation pipeline.
//!
//! An [`Avigrid`] client owns the month and season directories plus the
//! reference grid, and wires the batch loader, completeness gate, seasonal
//! builder and spatial aggregator together behind one surface.

use crate::aggregate::spatial::GridAggregator;
use crate::error::AvigridError;
use crate::grid::reference::ReferenceGrid;
use crate::ingest::loader::BatchLoader;
use crate::seasonal::builder::{BuildOutcome, SeasonBuilder};
use crate::seasonal::completeness::{season_completeness, CompletenessReport};
use crate::seasonal::store::SeasonStore;
use crate::summary::assembler::{report_totals, SummaryAssembler};
use crate::types::batch::BatchId;
use crate::types::cell_summary::{GridSummary, ReportTotals};
use crate::types::season::SeasonKey;
use crate::utils::{ensure_dir_exists, get_data_dir};
use bon::bon;
use log::{info, warn};
use std::path::PathBuf;

/// The pipeline client.
///
/// # Examples
///
/// ```no_run
/// use avigrid::Avigrid;
/// use avigrid::AvigridError;
///
/// fn run() -> Result<(), AvigridError> {
///     let pipeline = Avigrid::new()
///         .grid_path("district_grid.geojson".into())
///         .call()?;
///     for (key, outcome) in pipeline.build_ready_seasons()? {
///         println!("{key}: {outcome:?}");
///     }
///     Ok(())
/// }
/// ```
pub struct Avigrid {
    months_dir: PathBuf,
    grid: ReferenceGrid,
    loader: BatchLoader,
    store: SeasonStore,
}

#[bon]
impl Avigrid {
    /// Creates a pipeline client.
    ///
    /// # Arguments
    ///
    /// * `.grid_path(PathBuf)`: **Required.** GeoJSON file with the reference
    ///   grid polygons (WGS84, one numeric `grid_id` per feature).
    /// * `.months_dir(Option<PathBuf>)`: Optional. Directory holding the
    ///   monthly batch CSVs. Defaults to `<data dir>/avigrid/months`.
    /// * `.seasons_dir(Option<PathBuf>)`: Optional. Directory seasonal
    ///   artifacts are published to. Defaults to `<data dir>/avigrid/seasons`.
    ///
    /// Both directories are created if missing.
    ///
    /// # Errors
    ///
    /// Returns [`AvigridError::DataDirResolution`] if no directory was given
    /// and the platform data directory cannot be determined,
    /// [`AvigridError::DataDirCreation`] / [`AvigridError::NotADirectory`] if
    /// a directory cannot be set up, and [`AvigridError::Grid`] variants if
    /// the reference grid fails to load.
    #[builder(start_fn = new, finish_fn = call)]
    pub fn new_pipeline(
        grid_path: PathBuf,
        months_dir: Option<PathBuf>,
        seasons_dir: Option<PathBuf>,
    ) -> Result<Self, AvigridError> {
        let (months_dir, seasons_dir) = match (months_dir, seasons_dir) {
            (Some(months), Some(seasons)) => (months, seasons),
            (months, seasons) => {
                let data_dir = get_data_dir()?;
                (
                    months.unwrap_or_else(|| data_dir.join("months")),
                    seasons.unwrap_or_else(|| data_dir.join("seasons")),
                )
            }
        };
        ensure_dir_exists(&months_dir)?;
        ensure_dir_exists(&seasons_dir)?;

        let grid = ReferenceGrid::from_file(&grid_path)?;

        Ok(Self {
            loader: BatchLoader::new(&months_dir),
            store: SeasonStore::new(&seasons_dir),
            months_dir,
            grid,
        })
    }

    /// The reference grid this client joins observations against.
    pub fn grid(&self) -> &ReferenceGrid {
        &self.grid
    }

    /// Scans the month directory for batch files.
    ///
    /// Only `.csv` files whose stem parses as `MonthName_year` count; anything
    /// else is logged and skipped. The result is sorted chronologically and
    /// deduplicated.
    pub fn scan_batches(&self) -> Result<Vec<BatchId>, AvigridError> {
        let entries = std::fs::read_dir(&self.months_dir)
            .map_err(|e| AvigridError::MonthsDirRead(self.months_dir.clone(), e))?;

        let mut batches = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| AvigridError::MonthsDirRead(self.months_dir.clone(), e))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match BatchId::from_file_stem(stem) {
                Ok(id) => batches.push(id),
                Err(e) => warn!("Skipping {}: {e}", path.display()),
            }
        }
        batches.sort();
        batches.dedup();
        Ok(batches)
    }

    /// Reports which seasons are ready to roll up and which are still
    /// missing months, based on the batches currently on disk.
    pub fn completeness(&self) -> Result<CompletenessReport, AvigridError> {
        Ok(season_completeness(&self.scan_batches()?))
    }

    /// Builds the seasonal artifact for every season whose months are all
    /// present.
    ///
    /// Incomplete seasons are logged and left alone. A failure building one
    /// season is logged and does not stop the remaining seasons. Seasons that
    /// were already built come back as [`BuildOutcome::SkippedExisting`].
    pub fn build_ready_seasons(&self) -> Result<Vec<(SeasonKey, BuildOutcome)>, AvigridError> {
        let batches = self.scan_batches()?;
        let report = season_completeness(&batches);
        for pending in &report.pending {
            info!(
                "{} not ready: {} of {} months present",
                pending.key, pending.present, pending.required
            );
        }

        let builder = SeasonBuilder::new(&self.loader, &self.store);
        let mut outcomes = Vec::with_capacity(report.ready.len());
        for key in report.ready {
            match builder.build(key, &batches) {
                Ok(outcome) => outcomes.push((key, outcome)),
                Err(e) => warn!("Failed to build {key}: {e}"),
            }
        }
        Ok(outcomes)
    }

    /// Loads one monthly batch and joins it against the reference grid.
    pub fn summarize_batch(&self, id: BatchId) -> Result<GridSummary, AvigridError> {
        let df = self.loader.load(id)?;
        Ok(GridAggregator::new(&self.grid).summarize(&df)?)
    }

    /// Loads a published seasonal artifact and joins it against the
    /// reference grid.
    pub fn summarize_season(&self, key: SeasonKey) -> Result<GridSummary, AvigridError> {
        let df = self.loader.load_path(&self.store.artifact_path(key))?;
        Ok(GridAggregator::new(&self.grid).summarize(&df)?)
    }

    /// Per-cell statistics for a monthly batch, rendered as a GeoJSON
    /// feature collection string.
    pub fn batch_feature_collection(&self, id: BatchId) -> Result<String, AvigridError> {
        let summary = self.summarize_batch(id)?;
        Ok(SummaryAssembler::new(&self.grid).to_json(&summary))
    }

    /// Per-cell statistics for a season, rendered as a GeoJSON feature
    /// collection string.
    pub fn season_feature_collection(&self, key: SeasonKey) -> Result<String, AvigridError> {
        let summary = self.summarize_season(key)?;
        Ok(SummaryAssembler::new(&self.grid).to_json(&summary))
    }

    /// Row count and species richness for a monthly batch.
    pub fn batch_totals(&self, id: BatchId) -> Result<ReportTotals, AvigridError> {
        let df = self.loader.load(id)?;
        Ok(report_totals(&df)?)
    }

    /// Row count and species richness for a published season.
    pub fn season_totals(&self, key: SeasonKey) -> Result<ReportTotals, AvigridError> {
        let df = self.loader.load_path(&self.store.artifact_path(key))?;
        Ok(report_totals(&df)?)
    }
}
