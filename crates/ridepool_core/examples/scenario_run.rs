//! Minimal end-to-end dispatch run against an in-memory scenario, with no
//! file I/O. See `ridepool_cli` for the full CSV/TOML-driven entry point.

use ridepool_core::config::DispatchWeights;
use ridepool_core::dispatch::dispatch_all;
use ridepool_core::graph::StationGraph;
use ridepool_core::request::{Request, RequestId};
use ridepool_core::vehicle::{Vehicle, VehicleId};

fn main() {
    let stations = ["A", "B", "C"];
    let graph = build_ring_graph();

    let mut vehicles = vec![
        Vehicle::new(VehicleId(1), "alpha", 4, "van"),
        Vehicle::new(VehicleId(2), "beta", 4, "van"),
    ];

    let requests: Vec<Request> = (0..30)
        .map(|i| {
            let origin = stations[i % stations.len()];
            let destination = stations[(i + 1) % stations.len()];
            Request::new(
                RequestId(i as u64),
                station_id(origin),
                station_id(destination),
                1 + (i % 3) as u32,
                100 + i as i64 * 4,
                95 + i as i64 * 4,
                15,
                &graph,
            )
            .expect("scenario request should validate")
        })
        .collect();

    let weights = DispatchWeights::default().with_standing_time(1).with_delay_max(15);

    let mut reported = 0usize;
    let outcome = dispatch_all(
        &mut vehicles,
        &requests,
        &graph,
        &weights,
        Some(&mut |done, total| {
            if done * 10 / total.max(1) != reported {
                reported = done * 10 / total.max(1);
                println!("progress: {done}/{total}");
            }
        }),
    );

    for vehicle in &vehicles {
        println!("{}: {} stops", vehicle.name, vehicle.itinerary.len());
    }
    println!("denied: {}", outcome.denied.len());
}

fn station_id(name: &str) -> ridepool_core::graph::StationId {
    ridepool_core::graph::StationId(name.bytes().next().unwrap_or(0) as u32)
}

fn build_ring_graph() -> StationGraph {
    let a = station_id("A");
    let b = station_id("B");
    let c = station_id("C");
    StationGraph::builder()
        .with_travel_time(a, b, 8)
        .with_travel_time(b, a, 8)
        .with_travel_time(b, c, 6)
        .with_travel_time(c, b, 6)
        .with_travel_time(a, c, 12)
        .with_travel_time(c, a, 12)
        .with_distance(a, b, 4.0)
        .with_distance(b, a, 4.0)
        .with_distance(b, c, 3.0)
        .with_distance(c, b, 3.0)
        .with_distance(a, c, 6.0)
        .with_distance(c, a, 6.0)
        .build()
}
