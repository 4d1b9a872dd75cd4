//! The static polygon grid observations are binned into, with an R-tree over
//! cell bounding boxes for point lookup.

use crate::grid::error::GridError;
use geo::{BoundingRect, Contains, Geometry, MultiPolygon, Point};
use geojson::{FeatureCollection, GeoJson};
use log::info;
use rstar::{RTree, RTreeObject, AABB};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One polygon of the reference partition of the study region.
#[derive(Debug, Clone)]
pub struct GridCell {
    pub grid_id: i64,
    pub polygon: MultiPolygon<f64>,
    envelope: AABB<[f64; 2]>,
}

// R-tree entry referencing a cell by index, so polygons are stored once.
#[derive(Debug)]
struct CellEnvelope {
    index: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for CellEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// The full reference grid, loaded read-only from a GeoJSON feature
/// collection with one integer `grid_id` property per polygon feature.
#[derive(Debug)]
pub struct ReferenceGrid {
    cells: Vec<GridCell>,
    rtree: RTree<CellEnvelope>,
}

impl ReferenceGrid {
    /// Loads the grid from a GeoJSON file.
    ///
    /// Grid coordinates must already be in WGS84 (longitude/latitude); a
    /// legacy `crs` member naming anything else is rejected with
    /// [`GridError::UnsupportedCrs`].
    pub fn from_file(path: &Path) -> Result<ReferenceGrid, GridError> {
        let file = File::open(path).map_err(|e| GridError::FileRead(path.to_path_buf(), e))?;
        let geojson: GeoJson = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| GridError::GeoJsonParse(path.to_path_buf(), e))?;
        let collection = match geojson {
            GeoJson::FeatureCollection(fc) => fc,
            _ => return Err(GridError::NotFeatureCollection(path.to_path_buf())),
        };
        let grid = Self::from_feature_collection(collection)?;
        info!("Loaded reference grid with {} cells from {}", grid.len(), path.display());
        Ok(grid)
    }

    pub fn from_feature_collection(
        collection: FeatureCollection,
    ) -> Result<ReferenceGrid, GridError> {
        check_crs(&collection)?;

        let mut cells = Vec::with_capacity(collection.features.len());
        for (index, feature) in collection.features.into_iter().enumerate() {
            let grid_id = feature
                .properties
                .as_ref()
                .and_then(|properties| properties.get("grid_id"))
                .and_then(|value| value.as_i64().or_else(|| value.as_f64().map(|f| f as i64)))
                .ok_or(GridError::MissingGridId { index })?;

            let geometry = feature
                .geometry
                .ok_or(GridError::MissingGeometry { grid_id })?;
            let geometry = Geometry::<f64>::try_from(geometry.value)
                .map_err(|_| GridError::UnsupportedGeometry { grid_id })?;
            let polygon = match geometry {
                Geometry::Polygon(polygon) => MultiPolygon(vec![polygon]),
                Geometry::MultiPolygon(multi) => multi,
                _ => return Err(GridError::UnsupportedGeometry { grid_id }),
            };

            let rect = polygon
                .bounding_rect()
                .ok_or(GridError::EmptyGeometry { grid_id })?;
            let envelope =
                AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]);

            cells.push(GridCell {
                grid_id,
                polygon,
                envelope,
            });
        }

        let entries = cells
            .iter()
            .enumerate()
            .map(|(index, cell)| CellEnvelope {
                index,
                envelope: cell.envelope,
            })
            .collect();
        let rtree = RTree::bulk_load(entries);

        Ok(ReferenceGrid { cells, rtree })
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cell whose polygon strictly contains the point, if any.
    ///
    /// Candidates come from the R-tree bounding boxes; the containment test
    /// is exclusive of the boundary, so a point exactly on a shared edge
    /// belongs to no cell. Should candidate polygons ever overlap, the
    /// smallest grid id wins, keeping assignment deterministic.
    pub fn locate(&self, longitude: f64, latitude: f64) -> Option<&GridCell> {
        let point = Point::new(longitude, latitude);
        let query = AABB::from_point([longitude, latitude]);
        self.rtree
            .locate_in_envelope_intersecting(&query)
            .map(|entry| &self.cells[entry.index])
            .filter(|cell| cell.polygon.contains(&point))
            .min_by_key(|cell| cell.grid_id)
    }
}

fn check_crs(collection: &FeatureCollection) -> Result<(), GridError> {
    let Some(members) = &collection.foreign_members else {
        return Ok(());
    };
    let Some(crs) = members.get("crs") else {
        return Ok(());
    };
    let name = crs
        .get("properties")
        .and_then(|properties| properties.get("name"))
        .and_then(|name| name.as_str())
        .unwrap_or("unknown");
    if name.contains("4326") || name.contains("CRS84") {
        Ok(())
    } else {
        Err(GridError::UnsupportedCrs {
            crs: name.to_string(),
        })
    }
}
