//! Immutable topology store for the monitored network

use hashbrown::HashMap;

use super::types::{Segment, SegmentKey, Station};
use crate::{DirectionId, StationId};

/// The static topology: stations and directed segments.
///
/// Built once at startup and never mutated afterwards, so it is safe to
/// share across threads without synchronization.
#[derive(Debug, Clone)]
pub struct TransitNetwork {
    stations: HashMap<StationId, Station>,
    segments: HashMap<SegmentKey, Segment>,
}

impl TransitNetwork {
    pub(crate) fn new(
        stations: HashMap<StationId, Station>,
        segments: HashMap<SegmentKey, Segment>,
    ) -> Self {
        Self { stations, segments }
    }

    pub fn station(&self, id: &str) -> Option<&Station> {
        self.stations.get(id)
    }

    /// Looks up the directed segment a vehicle heading for `target` on
    /// `route` in `direction` is travelling. The segment's source station
    /// is the vehicle's directional predecessor.
    pub fn segment_for(
        &self,
        route: &str,
        target: &str,
        direction: DirectionId,
    ) -> Option<&Segment> {
        self.segments
            .get(&(route.to_owned(), target.to_owned(), direction))
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}
