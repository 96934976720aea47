//! GTFS-realtime wire decoding into flat record tables.

use std::time::Duration;

use gtfs_realtime::FeedMessage;
use log::debug;
use prost::Message;

use super::FeedSource;
use super::records::{FeedSnapshot, StopTimeRow, VehicleRow};
use crate::Error;

/// Per-request timeout; a slow feed must not stall past the polling interval.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the vehicle-positions and trip-updates protobuf feeds over HTTP
/// and flattens them into the record tables the normalizer consumes.
#[derive(Debug, Clone)]
pub struct GtfsRealtimeFeed {
    client: reqwest::blocking::Client,
    vehicle_positions_url: String,
    trip_updates_url: String,
}

impl GtfsRealtimeFeed {
    /// # Errors
    ///
    /// Returns [`Error::FeedUnavailable`] if the HTTP client cannot be built.
    pub fn new(
        vehicle_positions_url: impl Into<String>,
        trip_updates_url: impl Into<String>,
    ) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| Error::FeedUnavailable(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            vehicle_positions_url: vehicle_positions_url.into(),
            trip_updates_url: trip_updates_url.into(),
        })
    }

    fn fetch_message(&self, url: &str) -> Result<FeedMessage, Error> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::FeedUnavailable(format!("{url}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::FeedUnavailable(format!(
                "{url}: HTTP {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| Error::FeedUnavailable(format!("{url}: {e}")))?;

        FeedMessage::decode(bytes.as_ref())
            .map_err(|e| Error::FeedUnavailable(format!("{url}: protobuf decode failed: {e}")))
    }
}

impl FeedSource for GtfsRealtimeFeed {
    fn fetch(&self) -> Result<FeedSnapshot, Error> {
        let vehicles = flatten_vehicles(&self.fetch_message(&self.vehicle_positions_url)?);
        let stop_times = flatten_stop_times(&self.fetch_message(&self.trip_updates_url)?);
        debug!(
            "Fetched {} vehicle rows, {} stop-time rows",
            vehicles.len(),
            stop_times.len()
        );
        Ok(FeedSnapshot {
            vehicles,
            stop_times,
        })
    }
}

fn flatten_vehicles(feed: &FeedMessage) -> Vec<VehicleRow> {
    feed.entity
        .iter()
        .filter_map(|entity| {
            let vehicle = entity.vehicle.as_ref()?;
            let trip = vehicle.trip.as_ref();
            let position = vehicle.position.as_ref();
            Some(VehicleRow {
                id: entity.id.clone(),
                trip_id: trip.and_then(|t| t.trip_id.clone()),
                route_id: trip.and_then(|t| t.route_id.clone()),
                stop_id: vehicle.stop_id.clone(),
                current_status: vehicle.current_status,
                direction_id: trip.and_then(|t| t.direction_id),
                longitude: position.map(|p| f64::from(p.longitude)),
                latitude: position.map(|p| f64::from(p.latitude)),
            })
        })
        .collect()
}

/// One output row per stop-time update, so the stop sequence of a trip is
/// a plain group-by away for the normalizer.
fn flatten_stop_times(feed: &FeedMessage) -> Vec<StopTimeRow> {
    feed.entity
        .iter()
        .filter_map(|entity| entity.trip_update.as_ref())
        .filter_map(|trip_update| {
            let trip_id = trip_update.trip.trip_id.clone()?;
            let route_id = trip_update.trip.route_id.clone()?;
            Some((trip_id, route_id, &trip_update.stop_time_update))
        })
        .flat_map(|(trip_id, route_id, updates)| {
            updates
                .iter()
                .filter_map(move |update| {
                    update.stop_id.clone().map(|stop_id| StopTimeRow {
                        trip_id: trip_id.clone(),
                        route_id: route_id.clone(),
                        stop_id,
                    })
                })
                .collect::<Vec<_>>()
        })
        .collect()
}
