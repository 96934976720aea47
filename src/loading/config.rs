use std::path::PathBuf;

/// Locations of the static topology tables.
///
/// All three tables are produced by the offline topology pipeline; this
/// crate only reads them.
#[derive(Debug, Clone, Default)]
pub struct NetworkConfig {
    /// Stations table: `station_id,name,x,y,stop_lat,stop_lon,endpoint`.
    pub stations_path: PathBuf,
    /// Directed segments table with denormalized endpoint coordinates.
    pub segments_path: PathBuf,
    /// Crosswalk from feed stop codes to canonical station ids.
    pub crosswalk_path: PathBuf,
}
