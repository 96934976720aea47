//! Flat record tables decoded from the realtime feed.

/// One row of the vehicle positions table, as decoded from the wire.
///
/// Fields the wire format marks optional stay optional here; the
/// normalizer decides which rows are complete enough to keep.
#[derive(Debug, Clone, Default)]
pub struct VehicleRow {
    /// Feed entity id, used as the vehicle id.
    pub id: String,
    pub trip_id: Option<String>,
    pub route_id: Option<String>,
    /// Raw next-stop field: a numeric stop code, or free text for a small
    /// set of historically renamed stops.
    pub stop_id: Option<String>,
    pub current_status: Option<i32>,
    pub direction_id: Option<u32>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
}

/// One row of the trip updates table: one stop-time update per row.
#[derive(Debug, Clone)]
pub struct StopTimeRow {
    pub trip_id: String,
    pub route_id: String,
    pub stop_id: String,
}

/// Both realtime tables for one polling cycle.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    pub vehicles: Vec<VehicleRow>,
    pub stop_times: Vec<StopTimeRow>,
}
