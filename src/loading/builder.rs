use std::path::Path;

use geo::Point;
use hashbrown::HashMap;
use log::info;

use super::config::NetworkConfig;
use super::de::deserialize_table;
use super::tables::{CrosswalkRow, SegmentRow, StationRow};
use crate::model::{Segment, SegmentKey, Station, TransitNetwork};
use crate::{Error, StationId};

/// Builds the immutable topology store from the static tables.
///
/// # Errors
///
/// Returns an error if a table cannot be read, a segment references an
/// unknown station, or two segments share a `(route, target, direction)`
/// key.
pub fn create_network(config: &NetworkConfig) -> Result<TransitNetwork, Error> {
    validate_config(config)?;

    let stations: Vec<StationRow> = deserialize_table(&config.stations_path)?;
    let segments: Vec<SegmentRow> = deserialize_table(&config.segments_path)?;
    let network = network_from_tables(stations, segments)?;

    info!(
        "Loaded topology: {} stations, {} directed segments",
        network.station_count(),
        network.segment_count()
    );
    Ok(network)
}

/// Loads the crosswalk from feed stop codes to canonical station ids.
///
/// # Errors
///
/// Returns an error if the table cannot be read.
pub fn load_crosswalk(path: &Path) -> Result<HashMap<String, StationId>, Error> {
    let rows: Vec<CrosswalkRow> = deserialize_table(path)?;
    let crosswalk: HashMap<String, StationId> = rows
        .into_iter()
        .map(|row| (row.stop_code, row.station_id))
        .collect();
    info!("Loaded crosswalk with {} stop codes", crosswalk.len());
    Ok(crosswalk)
}

/// Assembles and validates the topology from already-parsed table rows.
///
/// # Errors
///
/// Returns [`Error::InvalidTopology`] on a dangling station reference or a
/// duplicate composite segment key.
pub fn network_from_tables(
    stations: Vec<StationRow>,
    segments: Vec<SegmentRow>,
) -> Result<TransitNetwork, Error> {
    let stations: HashMap<StationId, Station> = stations
        .into_iter()
        .map(|row| {
            let station = Station {
                id: row.station_id.clone(),
                name: row.name,
                screen: Point::new(row.x, row.y),
                geometry: Point::new(row.stop_lon, row.stop_lat),
                endpoint: row.endpoint,
            };
            (row.station_id, station)
        })
        .collect();

    let mut segment_map: HashMap<SegmentKey, Segment> = HashMap::with_capacity(segments.len());
    for row in segments {
        for station_id in [&row.source_station_id, &row.target_station_id] {
            if !stations.contains_key(station_id.as_str()) {
                return Err(Error::InvalidTopology(format!(
                    "Segment {} -> {} on route '{}' references unknown station '{}'",
                    row.source_station_id, row.target_station_id, row.route_id, station_id
                )));
            }
        }

        let segment = Segment {
            source: row.source_station_id,
            target: row.target_station_id,
            route_id: row.route_id,
            direction: row.direction,
            source_screen: Point::new(row.x_source, row.y_source),
            target_screen: Point::new(row.x_target, row.y_target),
            source_geometry: Point::new(row.lon_source, row.lat_source),
            target_geometry: Point::new(row.lon_target, row.lat_target),
        };
        let key = segment.key();
        if segment_map.insert(key.clone(), segment).is_some() {
            let (route, target, direction) = key;
            return Err(Error::InvalidTopology(format!(
                "Duplicate segment key (route '{route}', target '{target}', direction \
                 {direction}); the static pipeline must deduplicate"
            )));
        }
    }

    Ok(TransitNetwork::new(stations, segment_map))
}

fn validate_config(config: &NetworkConfig) -> Result<(), Error> {
    for (label, path) in [
        ("stations", &config.stations_path),
        ("segments", &config.segments_path),
        ("crosswalk", &config.crosswalk_path),
    ] {
        if !path.exists() {
            return Err(Error::InvalidData(format!(
                "{label} table not found: {}",
                path.display()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station_row(id: &str) -> StationRow {
        StationRow {
            station_id: id.to_owned(),
            name: id.to_owned(),
            x: 0.0,
            y: 0.0,
            stop_lat: 42.0,
            stop_lon: -71.0,
            endpoint: false,
        }
    }

    fn segment_row(source: &str, target: &str, route: &str, direction: u8) -> SegmentRow {
        SegmentRow {
            source_station_id: source.to_owned(),
            target_station_id: target.to_owned(),
            route_id: route.to_owned(),
            direction,
            x_source: 0.0,
            y_source: 0.0,
            x_target: 0.0,
            y_target: 10.0,
            lon_source: -71.0,
            lat_source: 42.0,
            lon_target: -71.0,
            lat_target: 42.2,
        }
    }

    #[test]
    fn builds_a_valid_network() {
        let network = network_from_tables(
            vec![station_row("place-a"), station_row("place-b")],
            vec![
                segment_row("place-a", "place-b", "orange", 1),
                segment_row("place-b", "place-a", "orange", 0),
            ],
        )
        .unwrap();

        assert_eq!(network.station_count(), 2);
        assert_eq!(network.segment_count(), 2);
        let segment = network.segment_for("orange", "place-b", 1).unwrap();
        assert_eq!(segment.source, "place-a");
    }

    #[test]
    fn rejects_dangling_station_reference() {
        let result = network_from_tables(
            vec![station_row("place-a")],
            vec![segment_row("place-a", "place-missing", "orange", 1)],
        );
        assert!(matches!(result, Err(Error::InvalidTopology(_))));
    }

    #[test]
    fn rejects_duplicate_composite_key() {
        let result = network_from_tables(
            vec![
                station_row("place-a"),
                station_row("place-b"),
                station_row("place-c"),
            ],
            vec![
                segment_row("place-a", "place-b", "orange", 1),
                segment_row("place-c", "place-b", "orange", 1),
            ],
        );
        assert!(matches!(result, Err(Error::InvalidTopology(_))));
    }
}
