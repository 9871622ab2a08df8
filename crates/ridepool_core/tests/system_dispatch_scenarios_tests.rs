use ridepool_core::config::DispatchWeights;
use ridepool_core::dispatch::dispatch_all;
use ridepool_core::graph::StationId;
use ridepool_core::test_helpers::{default_weights, request, two_station_graph, vehicle};

#[test]
fn scenario_c_delay_rejection() {
    let graph = two_station_graph();
    // With standing_time=1 and a 10-minute leg each way, pooling a second
    // rider sharing r1's corridor one minute later always pushes some stop's
    // delay to at least 1 minute (the least-bad insertion interleaves the
    // two pickups and dropoffs, but still can't avoid a 1-minute slip
    // somewhere). delay_max=0 leaves no feasible insertion for r2 at all.
    let weights = default_weights().with_delay_max(0);
    let mut vehicles = vec![vehicle(1, 4)];

    let r1 = request(1, 1, 2, 1, 100, 95, 5, &graph);
    let r2 = request(2, 1, 2, 1, 101, 96, 5, &graph);

    let outcome = dispatch_all(&mut vehicles, &[r1, r2], &graph, &weights, None);

    assert_eq!(outcome.denied, vec![r2.id]);
    let stops = vehicles[0].itinerary.stops();
    assert_eq!(stops.len(), 2, "r2 must not have been committed into the itinerary");
    assert_eq!(stops[0].station, StationId(1));
    assert_eq!(stops[0].planned_time, 100);
    assert_eq!(stops[1].station, StationId(2));
    assert_eq!(stops[1].planned_time, 111);
}

#[test]
fn scenario_e_same_station_ordering_is_respected() {
    let graph = two_station_graph();
    let weights = default_weights().with_delay_max(30);
    let mut vehicles = vec![vehicle(1, 4)];

    let r_a = request(1, 1, 2, 1, 100, 90, 30, &graph);
    let r_b = request(2, 1, 2, 1, 105, 90, 30, &graph);

    let outcome = dispatch_all(&mut vehicles, &[r_a, r_b], &graph, &weights, None);

    assert!(outcome.denied.is_empty());
    let stops = vehicles[0].itinerary.stops();
    // No pickup may be immediately followed by a dropoff at the same station.
    for pair in stops.windows(2) {
        let same_station = pair[0].station == pair[1].station;
        let pickup_then_dropoff = pair[0].is_pickup() && pair[1].is_dropoff();
        assert!(!(same_station && pickup_then_dropoff));
    }
}

#[test]
fn scenario_f_determinism_over_a_hundred_requests() {
    let graph = two_station_graph();
    let weights = default_weights().with_delay_max(60);

    let requests: Vec<_> = (0..100)
        .map(|i| request(i, 1, 2, 1, 100 + i as i64 * 2, 95 + i as i64 * 2, 60, &graph))
        .collect();

    let run = || {
        let mut vehicles = vec![vehicle(1, 4), vehicle(2, 4), vehicle(3, 4)];
        let outcome = dispatch_all(&mut vehicles, &requests, &graph, &weights, None);
        (vehicles, outcome.denied)
    };

    let (vehicles_a, denied_a) = run();
    let (vehicles_b, denied_b) = run();

    assert_eq!(denied_a, denied_b);
    for (a, b) in vehicles_a.iter().zip(vehicles_b.iter()) {
        assert_eq!(a.itinerary, b.itinerary);
    }
}

#[test]
fn conservation_of_pickups_and_dropoffs_at_run_end() {
    let graph = two_station_graph();
    let weights = default_weights().with_delay_max(60);
    let mut vehicles = vec![vehicle(1, 4), vehicle(2, 4)];

    let requests: Vec<_> = (0..10)
        .map(|i| request(i, 1, 2, 1, 100 + i as i64 * 5, 95 + i as i64 * 5, 60, &graph))
        .collect();

    dispatch_all(&mut vehicles, &requests, &graph, &weights, None);

    let total_boarding: i32 = vehicles
        .iter()
        .flat_map(|v| v.itinerary.stops())
        .map(|s| s.boarding)
        .sum();
    assert_eq!(total_boarding, 0);
}
