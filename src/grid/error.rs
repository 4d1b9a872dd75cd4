use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("Failed to read reference grid '{0}'")]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse GeoJSON from '{0}'")]
    GeoJsonParse(PathBuf, #[source] serde_json::Error),

    #[error("Reference grid '{0}' is not a GeoJSON feature collection")]
    NotFeatureCollection(PathBuf),

    #[error("Grid feature {index} has no integer 'grid_id' property")]
    MissingGridId { index: usize },

    #[error("Grid feature {grid_id} has no geometry")]
    MissingGeometry { grid_id: i64 },

    #[error("Grid feature {grid_id} is not a polygon or multi-polygon")]
    UnsupportedGeometry { grid_id: i64 },

    #[error("Grid feature {grid_id} has an empty bounding box")]
    EmptyGeometry { grid_id: i64 },

    #[error(
        "Reference grid declares coordinate reference '{crs}'; only WGS84 is supported \
         and no reprojection backend is available"
    )]
    UnsupportedCrs { crs: String },
}
