//! Projects vehicle reports onto the schematic map.
//!
//! Progress along a segment is measured in geographic space by vector
//! projection, then mapped onto the segment's screen-space endpoints by
//! linear interpolation. The whole cycle resolves as one batched pass.

use geo::Point;
use log::debug;
use rayon::prelude::*;

use crate::model::{TransitNetwork, VehicleReport};

/// A render-ready vehicle position.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPosition {
    pub vehicle_id: String,
    pub x: f64,
    pub y: f64,
    /// Route id with any branch suffix stripped, for colour lookup.
    pub route_class: String,
    /// Hover label: vehicle id plus next-stop status line.
    pub label: String,
}

/// Resolves a whole cycle of reports in one batched pass.
///
/// Reports that cannot be matched against the topology are dropped; one
/// unresolvable vehicle never affects the rest of the batch. Output order
/// follows input order.
pub fn resolve_positions(
    network: &TransitNetwork,
    reports: &[VehicleReport],
) -> Vec<ResolvedPosition> {
    reports
        .par_iter()
        .filter_map(|report| resolve_report(network, report))
        .collect()
}

fn resolve_report(network: &TransitNetwork, report: &VehicleReport) -> Option<ResolvedPosition> {
    let Some(destination) = network.station(&report.next_station_id) else {
        debug!(
            "Vehicle {}: unknown station '{}'",
            report.vehicle_id, report.next_station_id
        );
        return None;
    };

    let Some(segment) =
        network.segment_for(&report.route_id, &report.next_station_id, report.direction)
    else {
        debug!(
            "Vehicle {}: no segment (route '{}', target '{}', direction {})",
            report.vehicle_id, report.route_id, report.next_station_id, report.direction
        );
        return None;
    };

    // A stopped vehicle has arrived; geographic jitter must not pull it
    // back along the segment.
    let t = if report.status.is_stopped() {
        1.0
    } else {
        progress_fraction(
            segment.source_geometry,
            segment.target_geometry,
            report.position,
        )
    };
    let screen = interpolate(segment.source_screen, segment.target_screen, t);

    Some(ResolvedPosition {
        vehicle_id: report.vehicle_id.clone(),
        x: screen.x(),
        y: screen.y(),
        route_class: route_class(&report.route_id).to_owned(),
        label: format!(
            "Train: {}<br>{}{}",
            report.vehicle_id,
            report.status.label_prefix(),
            destination.name
        ),
    })
}

/// Unclamped progress of `position` along `origin -> target`: the length
/// of its projection onto the segment over the segment length.
///
/// Zero denominators are substituted with 1, so self-loop segments and a
/// vehicle reported exactly at its origin resolve without dividing by
/// zero. Values outside [0, 1] are passed through; an erratic report
/// renders slightly past an endpoint instead of being corrected.
pub fn progress_fraction(origin: Point<f64>, target: Point<f64>, position: Point<f64>) -> f64 {
    let dx = target.x() - origin.x();
    let dy = target.y() - origin.y();

    let mut det = dx * dx + dy * dy;
    if det == 0.0 {
        det = 1.0;
    }
    let a = (dx * (position.x() - origin.x()) + dy * (position.y() - origin.y())) / det;

    let projected_length = f64::hypot(a * dx, a * dy);
    let mut segment_length = f64::hypot(dx, dy);
    if segment_length == 0.0 {
        segment_length = 1.0;
    }
    projected_length / segment_length
}

fn interpolate(origin: Point<f64>, target: Point<f64>, t: f64) -> Point<f64> {
    Point::new(
        origin.x() + (target.x() - origin.x()) * t,
        origin.y() + (target.y() - origin.y()) * t,
    )
}

fn route_class(route_id: &str) -> &str {
    route_id.split('-').next().unwrap_or(route_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::network_from_tables;
    use crate::loading::tables::{SegmentRow, StationRow};
    use crate::model::VehicleStatus;

    const EPS: f64 = 1e-9;

    fn test_network() -> TransitNetwork {
        let stations = vec![
            StationRow {
                station_id: "place-a".to_owned(),
                name: "Alpha".to_owned(),
                x: 0.0,
                y: 0.0,
                stop_lat: 42.0,
                stop_lon: -71.0,
                endpoint: false,
            },
            StationRow {
                station_id: "place-b".to_owned(),
                name: "Beta".to_owned(),
                x: 0.0,
                y: 10.0,
                stop_lat: 42.2,
                stop_lon: -71.0,
                endpoint: false,
            },
            StationRow {
                station_id: "place-loop".to_owned(),
                name: "Loop".to_owned(),
                x: 5.0,
                y: 5.0,
                stop_lat: 42.4,
                stop_lon: -71.1,
                endpoint: true,
            },
        ];
        let segments = vec![
            SegmentRow {
                source_station_id: "place-a".to_owned(),
                target_station_id: "place-b".to_owned(),
                route_id: "red-a".to_owned(),
                direction: 1,
                x_source: 0.0,
                y_source: 0.0,
                x_target: 0.0,
                y_target: 10.0,
                lon_source: -71.0,
                lat_source: 42.0,
                lon_target: -71.0,
                lat_target: 42.2,
            },
            // Self-loop at an endpoint station.
            SegmentRow {
                source_station_id: "place-loop".to_owned(),
                target_station_id: "place-loop".to_owned(),
                route_id: "red-a".to_owned(),
                direction: 1,
                x_source: 5.0,
                y_source: 5.0,
                x_target: 5.0,
                y_target: 5.0,
                lon_source: -71.1,
                lat_source: 42.4,
                lon_target: -71.1,
                lat_target: 42.4,
            },
        ];
        network_from_tables(stations, segments).unwrap()
    }

    fn report(status: VehicleStatus, lon: f64, lat: f64) -> VehicleReport {
        VehicleReport {
            vehicle_id: "R-1".to_owned(),
            route_id: "red-a".to_owned(),
            status,
            direction: 1,
            next_station_id: "place-b".to_owned(),
            position: Point::new(lon, lat),
        }
    }

    #[test]
    fn midpoint_resolves_to_screen_midpoint() {
        let network = test_network();
        let reports = [report(VehicleStatus::InTransitTo, -71.0, 42.1)];

        let resolved = resolve_positions(&network, &reports);
        assert_eq!(resolved.len(), 1);
        assert!((resolved[0].x - 0.0).abs() < EPS);
        assert!((resolved[0].y - 5.0).abs() < EPS);
    }

    #[test]
    fn stopped_vehicle_renders_exactly_at_destination() {
        let network = test_network();
        // Position far off the segment; the override must win.
        let reports = [report(VehicleStatus::StoppedAt, -70.5, 41.3)];

        let resolved = resolve_positions(&network, &reports);
        assert_eq!(resolved[0].x, 0.0);
        assert_eq!(resolved[0].y, 10.0);
        assert_eq!(resolved[0].label, "Train: R-1<br>Stopped At: Beta");
    }

    #[test]
    fn vehicle_at_origin_resolves_to_origin() {
        let network = test_network();
        let reports = [report(VehicleStatus::IncomingAt, -71.0, 42.0)];

        let resolved = resolve_positions(&network, &reports);
        assert!(resolved[0].x.abs() < EPS);
        assert!(resolved[0].y.abs() < EPS);
    }

    #[test]
    fn vehicle_at_destination_resolves_to_destination() {
        let network = test_network();
        let reports = [report(VehicleStatus::InTransitTo, -71.0, 42.2)];

        let resolved = resolve_positions(&network, &reports);
        assert!((resolved[0].y - 10.0).abs() < EPS);
    }

    #[test]
    fn overshooting_report_is_not_clamped() {
        let network = test_network();
        let reports = [report(VehicleStatus::InTransitTo, -71.0, 42.3)];

        let resolved = resolve_positions(&network, &reports);
        assert!((resolved[0].y - 15.0).abs() < 1e-6);
    }

    #[test]
    fn self_loop_segment_resolves_without_division_error() {
        let network = test_network();
        let mut report = report(VehicleStatus::InTransitTo, -71.05, 42.39);
        report.next_station_id = "place-loop".to_owned();

        let resolved = resolve_positions(&network, &[report]);
        assert_eq!(resolved.len(), 1);
        assert!(resolved[0].x.is_finite());
        assert_eq!(resolved[0].x, 5.0);
        assert_eq!(resolved[0].y, 5.0);
    }

    #[test]
    fn unresolvable_reports_drop_without_affecting_the_batch() {
        let network = test_network();
        let mut missing_station = report(VehicleStatus::InTransitTo, -71.0, 42.1);
        missing_station.next_station_id = "place-unknown".to_owned();
        let mut missing_segment = report(VehicleStatus::InTransitTo, -71.0, 42.1);
        missing_segment.direction = 0;
        let good = report(VehicleStatus::InTransitTo, -71.0, 42.1);

        let resolved =
            resolve_positions(&network, &[missing_station, missing_segment, good.clone()]);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].vehicle_id, good.vehicle_id);
    }

    #[test]
    fn branch_suffix_is_stripped_from_route_class() {
        let network = test_network();
        let reports = [report(VehicleStatus::InTransitTo, -71.0, 42.1)];

        let resolved = resolve_positions(&network, &reports);
        assert_eq!(resolved[0].route_class, "red");
        assert_eq!(resolved[0].label, "Train: R-1<br>Next Stop: Beta");
    }

    #[test]
    fn progress_fraction_examples() {
        let origin = Point::new(-71.0, 42.0);
        let target = Point::new(-71.0, 42.2);

        let t = progress_fraction(origin, target, Point::new(-71.0, 42.1));
        assert!((t - 0.5).abs() < EPS);

        let t = progress_fraction(origin, target, origin);
        assert!(t.abs() < EPS);

        let t = progress_fraction(origin, target, target);
        assert!((t - 1.0).abs() < EPS);

        // Off-axis position projects onto the segment line.
        let t = progress_fraction(origin, target, Point::new(-70.9, 42.1));
        assert!((t - 0.5).abs() < EPS);

        // Zero-length segment: guarded, never NaN.
        let t = progress_fraction(origin, origin, Point::new(-70.9, 42.1));
        assert!(t.is_finite());
    }
}
