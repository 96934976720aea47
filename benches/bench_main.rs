use criterion::{Criterion, criterion_group, criterion_main};
use geo::Point;

use spiderline::loading::network_from_tables;
use spiderline::loading::tables::{SegmentRow, StationRow};
use spiderline::model::{TransitNetwork, VehicleReport, VehicleStatus};
use spiderline::resolve::resolve_positions;

/// Chain of stations along one line, segments in both directions.
fn synthetic_network(station_count: usize) -> TransitNetwork {
    let stations: Vec<StationRow> = (0..station_count)
        .map(|i| StationRow {
            station_id: format!("place-{i}"),
            name: format!("Station {i}"),
            x: i as f64,
            y: 0.0,
            stop_lat: 42.0 + i as f64 * 0.01,
            stop_lon: -71.0,
            endpoint: i == 0 || i == station_count - 1,
        })
        .collect();

    let mut segments = Vec::new();
    for i in 1..station_count {
        segments.push(SegmentRow {
            source_station_id: format!("place-{}", i - 1),
            target_station_id: format!("place-{i}"),
            route_id: "red-a".to_owned(),
            direction: 1,
            x_source: (i - 1) as f64,
            y_source: 0.0,
            x_target: i as f64,
            y_target: 0.0,
            lon_source: -71.0,
            lat_source: 42.0 + (i - 1) as f64 * 0.01,
            lon_target: -71.0,
            lat_target: 42.0 + i as f64 * 0.01,
        });
    }

    network_from_tables(stations, segments).expect("synthetic network is valid")
}

fn synthetic_reports(count: usize, station_count: usize) -> Vec<VehicleReport> {
    (0..count)
        .map(|i| {
            let target = 1 + i % (station_count - 1);
            VehicleReport {
                vehicle_id: format!("V-{i}"),
                route_id: "red-a".to_owned(),
                status: VehicleStatus::InTransitTo,
                direction: 1,
                next_station_id: format!("place-{target}"),
                position: Point::new(-71.0, 42.0 + target as f64 * 0.01 - 0.005),
            }
        })
        .collect()
}

fn bench_resolve(c: &mut Criterion) {
    let network = synthetic_network(128);
    let reports = synthetic_reports(1000, 128);

    c.bench_function("resolve_1000_vehicles", |b| {
        b.iter(|| resolve_positions(&network, &reports));
    });
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
