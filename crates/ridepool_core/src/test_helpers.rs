//! Shared fixtures for unit and integration tests.

use crate::config::DispatchWeights;
use crate::graph::{StationGraph, StationId};
use crate::request::{Request, RequestId};
use crate::vehicle::{Vehicle, VehicleId};

/// Two stations, ten minutes apart in both directions, symmetric distance.
pub fn two_station_graph() -> StationGraph {
    StationGraph::builder()
        .with_travel_time(StationId(1), StationId(2), 10)
        .with_travel_time(StationId(2), StationId(1), 10)
        .with_distance(StationId(1), StationId(2), 5.0)
        .with_distance(StationId(2), StationId(1), 5.0)
        .build()
}

pub fn vehicle(id: u64, seats: u32) -> Vehicle {
    Vehicle::new(VehicleId(id), format!("v{id}"), seats, "van")
}

pub fn request(
    id: u64,
    origin: u32,
    destination: u32,
    passengers: u32,
    promised_time: i64,
    created_time: i64,
    max_delay: u32,
    graph: &StationGraph,
) -> Request {
    Request::new(
        RequestId(id),
        StationId(origin),
        StationId(destination),
        passengers,
        promised_time,
        created_time,
        max_delay,
        graph,
    )
    .expect("fixture request should be valid")
}

pub fn default_weights() -> DispatchWeights {
    DispatchWeights::default().with_standing_time(1).with_delay_max(5)
}
