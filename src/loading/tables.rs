//! Typed rows of the static topology tables.

use serde::Deserialize;

/// Row of the stations table.
#[derive(Debug, Clone, Deserialize)]
pub struct StationRow {
    pub station_id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub stop_lat: f64,
    pub stop_lon: f64,
    #[serde(deserialize_with = "super::de::deserialize_flag", default)]
    pub endpoint: bool,
}

/// Row of the directed segments table.
///
/// Endpoint coordinates are denormalized onto each row by the topology
/// pipeline so that segment lookups never need a join.
#[derive(Debug, Clone, Deserialize)]
pub struct SegmentRow {
    pub source_station_id: String,
    pub target_station_id: String,
    pub route_id: String,
    pub direction: u8,
    pub x_source: f64,
    pub y_source: f64,
    pub x_target: f64,
    pub y_target: f64,
    pub lon_source: f64,
    pub lat_source: f64,
    pub lon_target: f64,
    pub lat_target: f64,
}

/// Row of the stop-code crosswalk table.
#[derive(Debug, Clone, Deserialize)]
pub struct CrosswalkRow {
    pub stop_code: String,
    pub station_id: String,
}
