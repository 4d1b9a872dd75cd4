//! The canonical observation record and its tabular schema.
//!
//! Batch files arrive with the raw provider field names (`comName`, `lat`,
//! `howMany`, ...). Ingestion renames those to the canonical columns below
//! exactly once, so every consumer sees a single layout.

use serde::{Deserialize, Serialize};

pub const COL_COMMON_NAME: &str = "commonName";
pub const COL_SCIENTIFIC_NAME: &str = "scientificName";
pub const COL_OBSERVATION_DATE: &str = "observationDate";
pub const COL_OBSERVATION_COUNT: &str = "observationCount";
pub const COL_LATITUDE: &str = "latitude";
pub const COL_LONGITUDE: &str = "longitude";
pub const COL_PROTOCOL: &str = "protocolName";
pub const COL_HABITAT: &str = "habitatSpecialization";
pub const COL_MIGRATORY: &str = "migratoryPattern";

/// Columns every batch must carry after normalization.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_COMMON_NAME,
    COL_SCIENTIFIC_NAME,
    COL_OBSERVATION_DATE,
    COL_OBSERVATION_COUNT,
    COL_LATITUDE,
    COL_LONGITUDE,
];

/// Raw provider field names mapped to their canonical column names.
pub(crate) const COLUMN_ALIASES: [(&str, &str); 6] = [
    ("comName", COL_COMMON_NAME),
    ("sciName", COL_SCIENTIFIC_NAME),
    ("obsDt", COL_OBSERVATION_DATE),
    ("howMany", COL_OBSERVATION_COUNT),
    ("lat", COL_LATITUDE),
    ("lng", COL_LONGITUDE),
];

/// One recorded sighting of a species at a point and time.
///
/// Fields mirror the canonical columns. Every field is optional because a
/// required *column* can still hold null *cells*; consumers decide per field
/// whether a missing value excludes the row (coordinates) or merely skips it
/// in a ranking (category values).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub common_name: Option<String>,
    pub scientific_name: Option<String>,
    pub observation_date: Option<String>,
    pub observation_count: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub protocol_name: Option<String>,
    pub habitat_specialization: Option<String>,
    pub migratory_pattern: Option<String>,
}
