//! Point-in-cell assignment and per-cell statistics.

use crate::aggregate::error::AggregateError;
use crate::aggregate::top_values::top_values;
use crate::grid::reference::ReferenceGrid;
use crate::types::cell_summary::{CellSummary, GridSummary};
use crate::types::observation::{
    Observation, COL_COMMON_NAME, COL_HABITAT, COL_LATITUDE, COL_LONGITUDE, COL_MIGRATORY,
    COL_OBSERVATION_COUNT, COL_OBSERVATION_DATE, COL_PROTOCOL, COL_SCIENTIFIC_NAME,
};
use log::info;
use polars::prelude::*;
use std::collections::BTreeMap;

/// Maximum entries per top list in a cell summary.
pub const TOP_VALUES_PER_CELL: usize = 5;

/// Joins observation points against the reference grid and computes per-cell
/// statistics.
pub struct GridAggregator<'a> {
    grid: &'a ReferenceGrid,
}

impl<'a> GridAggregator<'a> {
    pub fn new(grid: &'a ReferenceGrid) -> GridAggregator<'a> {
        GridAggregator { grid }
    }

    /// Assigns every observation to the cell containing its point and
    /// summarizes each cell over the full reference grid.
    ///
    /// The result covers every grid cell (cells without observations carry
    /// zero defaults), and observations matching no cell are counted as
    /// unassigned rather than dropped, so cell counts plus the unassigned
    /// count always add up to the input row count.
    pub fn summarize(&self, df: &DataFrame) -> Result<GridSummary, AggregateError> {
        for column in [COL_LATITUDE, COL_LONGITUDE] {
            if df.column(column).is_err() {
                return Err(AggregateError::MissingField(column.to_string()));
            }
        }

        let observations = extract_observations(df)?;

        let mut groups: BTreeMap<i64, Vec<&Observation>> = BTreeMap::new();
        let mut unassigned: u32 = 0;
        for observation in &observations {
            let cell = match (observation.longitude, observation.latitude) {
                (Some(longitude), Some(latitude)) => self.grid.locate(longitude, latitude),
                _ => None,
            };
            match cell {
                Some(cell) => groups.entry(cell.grid_id).or_default().push(observation),
                None => unassigned += 1,
            }
        }
        if unassigned > 0 {
            info!("{unassigned} of {} observations fell outside the reference grid", observations.len());
        }

        let mut cells: Vec<CellSummary> = self
            .grid
            .cells()
            .iter()
            .map(|cell| match groups.get(&cell.grid_id) {
                Some(group) => summarize_cell(cell.grid_id, group),
                None => CellSummary::empty(cell.grid_id),
            })
            .collect();
        cells.sort_by_key(|cell| cell.grid_id);

        Ok(GridSummary {
            cells,
            unassigned,
            total_observations: observations.len() as u32,
        })
    }
}

fn summarize_cell(grid_id: i64, group: &[&Observation]) -> CellSummary {
    CellSummary {
        grid_id,
        observation_count: group.len() as u32,
        top_species: top_values(
            group.iter().map(|o| o.common_name.as_deref()),
            TOP_VALUES_PER_CELL,
        ),
        top_habitat: top_values(
            group.iter().map(|o| o.habitat_specialization.as_deref()),
            TOP_VALUES_PER_CELL,
        ),
        top_migratory: top_values(
            group.iter().map(|o| o.migratory_pattern.as_deref()),
            TOP_VALUES_PER_CELL,
        ),
        top_protocol: top_values(
            group.iter().map(|o| o.protocol_name.as_deref()),
            TOP_VALUES_PER_CELL,
        ),
    }
}

/// Materializes typed observation records out of a normalized frame.
///
/// Only latitude/longitude are required columns here; anything else that is
/// absent simply yields `None` fields, matching how optional categories are
/// treated downstream.
fn extract_observations(df: &DataFrame) -> Result<Vec<Observation>, AggregateError> {
    let height = df.height();
    if height == 0 {
        return Ok(Vec::new());
    }

    let latitude = float_column(df, COL_LATITUDE)?;
    let longitude = float_column(df, COL_LONGITUDE)?;
    let common_name = optional_string_column(df, COL_COMMON_NAME)?;
    let scientific_name = optional_string_column(df, COL_SCIENTIFIC_NAME)?;
    let observation_date = optional_string_column(df, COL_OBSERVATION_DATE)?;
    let observation_count = optional_int_column(df, COL_OBSERVATION_COUNT)?;
    let protocol_name = optional_string_column(df, COL_PROTOCOL)?;
    let habitat = optional_string_column(df, COL_HABITAT)?;
    let migratory = optional_string_column(df, COL_MIGRATORY)?;

    let string_at = |ca: &Option<StringChunked>, i: usize| -> Option<String> {
        ca.as_ref().and_then(|ca| ca.get(i)).map(str::to_string)
    };

    let mut observations = Vec::with_capacity(height);
    for i in 0..height {
        observations.push(Observation {
            common_name: string_at(&common_name, i),
            scientific_name: string_at(&scientific_name, i),
            observation_date: string_at(&observation_date, i),
            observation_count: observation_count.as_ref().and_then(|ca| ca.get(i)),
            latitude: latitude.get(i),
            longitude: longitude.get(i),
            protocol_name: string_at(&protocol_name, i),
            habitat_specialization: string_at(&habitat, i),
            migratory_pattern: string_at(&migratory, i),
        });
    }
    Ok(observations)
}

fn float_column(df: &DataFrame, name: &str) -> Result<Float64Chunked, AggregateError> {
    let column = df
        .column(name)
        .map_err(|_| AggregateError::MissingField(name.to_string()))?;
    // Non-strict cast: unparseable cells become nulls and end up unassigned.
    Ok(column.cast(&DataType::Float64)?.f64()?.clone())
}

fn optional_string_column(
    df: &DataFrame,
    name: &str,
) -> Result<Option<StringChunked>, AggregateError> {
    match df.column(name) {
        Ok(column) => Ok(Some(column.cast(&DataType::String)?.str()?.clone())),
        Err(_) => Ok(None),
    }
}

fn optional_int_column(
    df: &DataFrame,
    name: &str,
) -> Result<Option<Int64Chunked>, AggregateError> {
    match df.column(name) {
        Ok(column) => Ok(Some(column.cast(&DataType::Int64)?.i64()?.clone())),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::FeatureCollection;
    use polars::df;
    use serde_json::json;

    // Two adjacent unit squares, grid ids 1 and 2.
    fn two_cell_grid() -> ReferenceGrid {
        let value = json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "grid_id": 1 },
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
                    }
                },
                {
                    "type": "Feature",
                    "properties": { "grid_id": 2 },
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[1.0, 0.0], [2.0, 0.0], [2.0, 1.0], [1.0, 1.0], [1.0, 0.0]]]
                    }
                }
            ]
        });
        let collection: FeatureCollection = serde_json::from_value(value).unwrap();
        ReferenceGrid::from_feature_collection(collection).unwrap()
    }

    #[test]
    fn assigns_points_to_their_cells() {
        let grid = two_cell_grid();
        // 6 points in cell 1, 4 in cell 2, none outside.
        let longitudes = [0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 1.2, 1.4, 1.6, 1.8];
        let df = df!(
            "commonName" => vec!["House Crow"; 10],
            "latitude" => vec![0.5; 10],
            "longitude" => longitudes.to_vec(),
        )
        .unwrap();

        let summary = GridAggregator::new(&grid).summarize(&df).unwrap();
        assert_eq!(summary.total_observations, 10);
        assert_eq!(summary.unassigned, 0);
        assert_eq!(summary.cells.len(), 2);
        assert_eq!(summary.cells[0].grid_id, 1);
        assert_eq!(summary.cells[0].observation_count, 6);
        assert_eq!(summary.cells[1].grid_id, 2);
        assert_eq!(summary.cells[1].observation_count, 4);
    }

    #[test]
    fn cell_counts_plus_unassigned_equal_input_rows() {
        let grid = two_cell_grid();
        let df = df!(
            "latitude" => [Some(0.5), Some(0.5), Some(5.0), None],
            "longitude" => [Some(0.5), Some(1.5), Some(5.0), Some(0.5)],
        )
        .unwrap();

        let summary = GridAggregator::new(&grid).summarize(&df).unwrap();
        let assigned: u32 = summary.cells.iter().map(|c| c.observation_count).sum();
        assert_eq!(assigned + summary.unassigned, summary.total_observations);
        assert_eq!(summary.total_observations, 4);
        assert_eq!(summary.unassigned, 2);
    }

    #[test]
    fn null_coordinates_count_as_unassigned() {
        let grid = two_cell_grid();
        let df = df!(
            "latitude" => [Some(0.5), None],
            "longitude" => [Some(0.5), Some(0.5)],
        )
        .unwrap();

        let summary = GridAggregator::new(&grid).summarize(&df).unwrap();
        assert_eq!(summary.unassigned, 1);
        assert_eq!(summary.cells[0].observation_count, 1);
    }

    #[test]
    fn missing_latitude_column_fails_before_any_summary() {
        let grid = two_cell_grid();
        let df = df!("longitude" => [0.5, 1.5]).unwrap();
        let err = GridAggregator::new(&grid).summarize(&df).unwrap_err();
        assert!(matches!(err, AggregateError::MissingField(column) if column == COL_LATITUDE));
    }

    #[test]
    fn empty_input_still_covers_every_cell() {
        let grid = two_cell_grid();
        let df = df!(
            "latitude" => Vec::<f64>::new(),
            "longitude" => Vec::<f64>::new(),
        )
        .unwrap();

        let summary = GridAggregator::new(&grid).summarize(&df).unwrap();
        assert_eq!(summary.total_observations, 0);
        assert_eq!(summary.unassigned, 0);
        assert_eq!(summary.cells.len(), 2);
        assert!(summary.cells.iter().all(|c| c.observation_count == 0));
        assert!(summary.cells.iter().all(|c| c.top_species.is_empty()));
    }

    #[test]
    fn top_lists_are_capped_sorted_and_tie_broken() {
        let grid = two_cell_grid();
        // Seven species in cell 1: "f" appears twice, six singles.
        let names = ["f", "f", "a", "b", "c", "d", "e", "g"];
        let df = df!(
            "commonName" => names.to_vec(),
            "latitude" => vec![0.5; 8],
            "longitude" => vec![0.5; 8],
        )
        .unwrap();

        let summary = GridAggregator::new(&grid).summarize(&df).unwrap();
        let top = &summary.cells[0].top_species;
        assert_eq!(top.len(), TOP_VALUES_PER_CELL);
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
        let values: Vec<&str> = top.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, ["f", "a", "b", "c", "d"]);
    }

    #[test]
    fn optional_category_columns_may_be_absent() {
        let grid = two_cell_grid();
        let df = df!(
            "commonName" => ["House Crow"],
            "latitude" => [0.5],
            "longitude" => [0.5],
        )
        .unwrap();

        let summary = GridAggregator::new(&grid).summarize(&df).unwrap();
        let cell = &summary.cells[0];
        assert_eq!(cell.observation_count, 1);
        assert_eq!(cell.top_species.len(), 1);
        assert!(cell.top_habitat.is_empty());
        assert!(cell.top_migratory.is_empty());
        assert!(cell.top_protocol.is_empty());
    }
}
