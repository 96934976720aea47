//! Turns raw feed records into resolvable vehicle reports.

use geo::Point;
use hashbrown::HashMap;
use itertools::Itertools;
use log::debug;

use super::records::{FeedSnapshot, StopTimeRow, VehicleRow};
use super::rules::FeedRules;
use crate::StationId;
use crate::model::{VehicleReport, VehicleStatus};

/// Stateless per-cycle normalizer: route filtering, branch disambiguation,
/// stop-identifier resolution, completeness filtering.
///
/// A pure function of (rules, crosswalk, this cycle's snapshot); holds no
/// state between calls.
#[derive(Debug, Clone)]
pub struct FeedNormalizer {
    rules: FeedRules,
    crosswalk: HashMap<String, StationId>,
}

impl FeedNormalizer {
    pub fn new(rules: FeedRules, crosswalk: HashMap<String, StationId>) -> Self {
        Self { rules, crosswalk }
    }

    /// Produces one [`VehicleReport`] per fully resolvable vehicle row.
    ///
    /// Rows that fail any rule are dropped individually; one bad vehicle
    /// never affects the rest of the batch.
    pub fn normalize(&self, snapshot: &FeedSnapshot) -> Vec<VehicleReport> {
        let branch_by_trip = self.classify_branches(&snapshot.stop_times);
        snapshot
            .vehicles
            .iter()
            .filter_map(|row| self.normalize_vehicle(row, &branch_by_trip))
            .collect()
    }

    /// Joins each split route's trips against the stop-time table and
    /// assigns every trip a branch: the first branch in priority order
    /// whose member set intersects the trip's stop sequence, else the
    /// split's fallback.
    fn classify_branches(&self, stop_times: &[StopTimeRow]) -> HashMap<String, String> {
        let mut assignments = HashMap::new();
        for split in &self.rules.branch_splits {
            let sequences: std::collections::HashMap<&str, Vec<&str>> = stop_times
                .iter()
                .filter(|row| row.route_id.eq_ignore_ascii_case(&split.route_id))
                .map(|row| (row.trip_id.as_str(), row.stop_id.as_str()))
                .into_group_map();

            for (trip_id, stops) in sequences {
                let branch = split
                    .branches
                    .iter()
                    .find(|rule| {
                        stops
                            .iter()
                            .any(|stop| rule.member_stop_codes.contains(*stop))
                    })
                    .map(|rule| rule.branch_id.clone())
                    .or_else(|| split.fallback.clone());
                if let Some(branch) = branch {
                    assignments.insert(trip_id.to_owned(), branch);
                }
            }
        }
        assignments
    }

    fn normalize_vehicle(
        &self,
        row: &VehicleRow,
        branch_by_trip: &HashMap<String, String>,
    ) -> Option<VehicleReport> {
        let raw_route = row.route_id.as_deref()?;
        if !self.rules.supported_routes.contains(raw_route) {
            return None;
        }
        let mut route_id = raw_route.to_lowercase();

        let raw_stop = row.stop_id.as_deref()?;
        if self.rules.ignored_stop_ids.contains(raw_stop) {
            return None;
        }

        if self
            .rules
            .branch_splits
            .iter()
            .any(|split| split.route_id == route_id)
        {
            match row.trip_id.as_ref().and_then(|t| branch_by_trip.get(t)) {
                Some(branch) => route_id = branch.clone(),
                None => {
                    // Without a stop sequence the shared id cannot be
                    // mapped onto a branch segment.
                    debug!("Vehicle {}: no stop sequence to split '{route_id}'", row.id);
                    return None;
                }
            }
        }

        let stop_code = self.apply_stop_alias(raw_stop);
        let Some(station_id) = self.crosswalk.get(stop_code) else {
            debug!("Vehicle {}: stop code '{stop_code}' not in crosswalk", row.id);
            return None;
        };

        let status = VehicleStatus::from_code(row.current_status?)?;
        let direction = u8::try_from(row.direction_id?).ok()?;
        let longitude = row.longitude?;
        let latitude = row.latitude?;

        Some(VehicleReport {
            vehicle_id: row.id.clone(),
            route_id,
            status,
            direction,
            next_station_id: station_id.clone(),
            position: Point::new(longitude, latitude),
        })
    }

    /// Renamed stops report free text instead of a code; a literal
    /// substring match overrides the raw field before crosswalk lookup.
    fn apply_stop_alias<'a>(&'a self, raw_stop: &'a str) -> &'a str {
        self.rules
            .stop_aliases
            .iter()
            .find(|(fragment, _)| raw_stop.contains(fragment.as_str()))
            .map_or(raw_stop, |(_, code)| code.as_str())
    }
}
