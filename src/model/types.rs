use geo::Point;

use crate::{DirectionId, RouteId, StationId};

/// A station on the schematic map.
#[derive(Debug, Clone)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    /// Position on the schematic canvas.
    pub screen: Point<f64>,
    /// Geographic position, x = longitude, y = latitude.
    pub geometry: Point<f64>,
    /// Terminal station of its line.
    pub endpoint: bool,
}

/// Composite lookup key for directed segments.
///
/// A vehicle report carries its route, next station and direction; this
/// triple identifies the segment the vehicle is currently travelling.
pub type SegmentKey = (RouteId, StationId, DirectionId);

/// A directed edge between two adjacent stations on one branch.
///
/// Both endpoints' coordinates are denormalized onto the segment so a
/// resolution pass never joins back to the station table.
#[derive(Debug, Clone)]
pub struct Segment {
    pub source: StationId,
    pub target: StationId,
    pub route_id: RouteId,
    pub direction: DirectionId,
    pub source_screen: Point<f64>,
    pub target_screen: Point<f64>,
    pub source_geometry: Point<f64>,
    pub target_geometry: Point<f64>,
}

impl Segment {
    pub fn key(&self) -> SegmentKey {
        (self.route_id.clone(), self.target.clone(), self.direction)
    }
}

/// Tri-state stop status of a vehicle, mirroring the wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleStatus {
    /// About to arrive at its next stop (wire code 0).
    IncomingAt,
    /// Standing at the stop (wire code 1).
    StoppedAt,
    /// Moving between stops (wire code 2).
    InTransitTo,
}

impl VehicleStatus {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::IncomingAt),
            1 => Some(Self::StoppedAt),
            2 => Some(Self::InTransitTo),
            _ => None,
        }
    }

    pub fn is_stopped(self) -> bool {
        matches!(self, Self::StoppedAt)
    }

    /// Prefix of the hover label, shown before the next station's name.
    pub fn label_prefix(self) -> &'static str {
        match self {
            Self::StoppedAt => "Stopped At: ",
            Self::IncomingAt | Self::InTransitTo => "Next Stop: ",
        }
    }
}

/// One normalized vehicle observation within the current polling cycle.
///
/// Reports carry no identity across cycles beyond the vehicle id; the
/// normalizer produces a fresh batch every poll.
#[derive(Debug, Clone)]
pub struct VehicleReport {
    pub vehicle_id: String,
    /// Branch-resolved route id, lowercase.
    pub route_id: RouteId,
    pub status: VehicleStatus,
    pub direction: DirectionId,
    /// Canonical id of the next station, resolved through the crosswalk.
    pub next_station_id: StationId,
    /// Current geographic position, x = longitude, y = latitude.
    pub position: Point<f64>,
}
