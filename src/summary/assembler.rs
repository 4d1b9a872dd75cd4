//! Boundary serialization for the external rendering layer.
//!
//! Merges per-cell statistics back onto the grid geometry as a GeoJSON
//! feature collection and exposes the scalar totals used by the textual
//! summary. No aggregation happens here.

use crate::aggregate::error::AggregateError;
use crate::grid::reference::ReferenceGrid;
use crate::types::cell_summary::{CellSummary, GridSummary, RankedValue, ReportTotals};
use crate::types::observation::COL_SCIENTIFIC_NAME;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject};
use polars::prelude::*;
use serde_json::json;
use std::collections::HashMap;

pub struct SummaryAssembler<'a> {
    grid: &'a ReferenceGrid,
}

impl<'a> SummaryAssembler<'a> {
    pub fn new(grid: &'a ReferenceGrid) -> SummaryAssembler<'a> {
        SummaryAssembler { grid }
    }

    /// Merges per-cell statistics onto the grid geometry.
    ///
    /// Every grid cell becomes one feature; cells the summary has no entry
    /// for (or with no observations) carry a zero count and empty lists, so
    /// the renderer never sees absent properties.
    pub fn feature_collection(&self, summary: &GridSummary) -> FeatureCollection {
        let by_id: HashMap<i64, &CellSummary> =
            summary.cells.iter().map(|cell| (cell.grid_id, cell)).collect();

        let features = self
            .grid
            .cells()
            .iter()
            .map(|cell| {
                let empty = CellSummary::empty(cell.grid_id);
                let stats = by_id.get(&cell.grid_id).copied().unwrap_or(&empty);

                let mut properties = JsonObject::new();
                properties.insert("grid_id".to_string(), json!(cell.grid_id));
                properties.insert("observations".to_string(), json!(stats.observation_count));
                properties.insert("top_species".to_string(), json!(labels(&stats.top_species)));
                properties.insert("habitat".to_string(), json!(labels(&stats.top_habitat)));
                properties.insert("migratory".to_string(), json!(labels(&stats.top_migratory)));
                properties.insert("protocol".to_string(), json!(labels(&stats.top_protocol)));

                Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(geojson::Value::from(&cell.polygon))),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }

    /// The merged feature collection as a GeoJSON string for the renderer.
    pub fn to_json(&self, summary: &GridSummary) -> String {
        GeoJson::from(self.feature_collection(summary)).to_string()
    }
}

fn labels(ranked: &[RankedValue]) -> Vec<&str> {
    ranked.iter().map(|r| r.value.as_str()).collect()
}

/// Scalars for the textual summary of a batch or season: total rows and the
/// number of distinct scientific names (nulls excluded).
pub fn report_totals(df: &DataFrame) -> Result<ReportTotals, AggregateError> {
    let species_richness = match df.column(COL_SCIENTIFIC_NAME) {
        Ok(column) => {
            let series = column.as_materialized_series();
            let distinct = series.n_unique()?;
            // n_unique counts null as a distinct value.
            distinct - usize::from(series.null_count() > 0)
        }
        Err(_) => 0,
    };
    Ok(ReportTotals {
        total_observations: df.height(),
        species_richness,
    })
}
