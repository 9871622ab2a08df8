//! Recompute planned times, occupancies, and delays for a candidate
//! itinerary, then accept or reject it.

use crate::config::DispatchWeights;
use crate::graph::StationGraph;
use crate::insertion::Candidate;
use crate::itinerary::Itinerary;
use crate::time::delay_minutes;
use crate::vehicle::Vehicle;

/// A candidate that survived feasibility checking, tagged with the data the
/// scorer needs.
#[derive(Debug, Clone)]
pub struct FeasibleCandidate {
    pub vehicle_index: usize,
    pub itinerary: Itinerary,
    pub pre_insertion_len: usize,
    pub pre_delay_sum: u32,
    pub pre_distance_sum: f64,
    pub pooling_rate: f64,
}

/// Recompute `candidate`'s mutable tail in place and decide whether it is
/// feasible for `vehicle`. Stops before `candidate.frozen_len` are left
/// untouched: they were already correct when committed by an earlier
/// request and are not re-planned here.
pub fn check(
    candidate: Candidate,
    vehicle: &Vehicle,
    graph: &StationGraph,
    weights: &DispatchWeights,
) -> Option<FeasibleCandidate> {
    let Candidate {
        mut itinerary,
        frozen_len,
        pre_insertion_len,
        pre_delay_sum,
        pre_distance_sum,
    } = candidate;

    {
        let stops = itinerary.stops_mut();
        if frozen_len == 0 {
            if let Some(first) = stops.first_mut() {
                // Anchor semantics (see DESIGN.md): the first stop of the
                // whole itinerary keeps its given planned_time and is never
                // recomputed, so its delay is zero by construction.
                first.delay = 0;
                first.occupation = first.boarding.max(0);
            }
        }
        for k in frozen_len.max(1)..stops.len() {
            let prev = stops[k - 1];
            let travel_time = graph
                .travel_time(prev.station, stops[k].station)
                .expect("graph completeness must be validated before dispatch");
            stops[k].planned_time = prev.planned_time + travel_time + weights.standing_time;
            stops[k].delay = delay_minutes(stops[k].planned_time, stops[k].promised_time);
            stops[k].occupation = prev.occupation + stops[k].boarding;
        }
    }

    let stops = itinerary.stops();

    let max_delay = stops.iter().map(|s| s.delay).max().unwrap_or(0);
    if max_delay > weights.delay_max {
        return None;
    }

    let max_occupation = stops.iter().map(|s| s.occupation).max().unwrap_or(0);
    let min_occupation = stops.iter().map(|s| s.occupation).min().unwrap_or(0);
    debug_assert!(
        min_occupation >= 0,
        "occupation invariant violated: more dropoffs than pickups boarded"
    );
    if max_occupation as u32 > vehicle.seats {
        return None;
    }

    for pair in stops.windows(2) {
        if pair[0].station == pair[1].station && pair[0].is_pickup() && pair[1].is_dropoff() {
            return None;
        }
    }

    let pooling_rate = if stops.is_empty() {
        0.0
    } else {
        stops.iter().map(|s| s.occupation as f64).sum::<f64>() / stops.len() as f64
    };

    Some(FeasibleCandidate {
        vehicle_index: 0,
        itinerary,
        pre_insertion_len,
        pre_delay_sum,
        pre_distance_sum,
        pooling_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::StationId;
    use crate::insertion::enumerate_candidates;
    use crate::request::{Request, RequestId};
    use crate::vehicle::VehicleId;

    fn graph() -> StationGraph {
        StationGraph::builder()
            .with_travel_time(StationId(1), StationId(2), 10)
            .with_travel_time(StationId(2), StationId(1), 10)
            .with_distance(StationId(1), StationId(2), 5.0)
            .with_distance(StationId(2), StationId(1), 5.0)
            .build()
    }

    #[test]
    fn accepts_simple_empty_vehicle_insertion() {
        let graph = graph();
        let request = Request::new(
            RequestId(1),
            StationId(1),
            StationId(2),
            2,
            100,
            97,
            5,
            &graph,
        )
        .unwrap();
        let weights = DispatchWeights::default().with_standing_time(1);
        let vehicle = Vehicle::new(VehicleId(1), "v1", 4, "van");
        let candidates = enumerate_candidates(&vehicle.itinerary, &graph, &request, &weights);
        assert_eq!(candidates.len(), 1);
        let feasible = check(candidates.into_iter().next().unwrap(), &vehicle, &graph, &weights)
            .expect("should be feasible");
        let stops = feasible.itinerary.stops();
        assert_eq!(stops[0].planned_time, 100);
        assert_eq!(stops[1].planned_time, 111);
        assert_eq!(stops[1].delay, 0);
    }

    #[test]
    fn rejects_over_capacity() {
        let graph = graph();
        let request = Request::new(
            RequestId(1),
            StationId(1),
            StationId(2),
            3,
            100,
            97,
            5,
            &graph,
        )
        .unwrap();
        let weights = DispatchWeights::default();
        let vehicle = Vehicle::new(VehicleId(1), "v1", 2, "van");
        let candidates = enumerate_candidates(&vehicle.itinerary, &graph, &request, &weights);
        let feasible = check(candidates.into_iter().next().unwrap(), &vehicle, &graph, &weights);
        assert!(feasible.is_none());
    }

    /// Re-checking an already-feasible itinerary must reproduce the same
    /// planned times, delays, and occupancies: feasibility checking is pure
    /// recomputation, not a source of drift across repeated calls.
    #[test]
    fn feasibility_check_is_idempotent() {
        let graph = graph();
        let request = Request::new(
            RequestId(1),
            StationId(1),
            StationId(2),
            2,
            100,
            97,
            5,
            &graph,
        )
        .unwrap();
        let weights = DispatchWeights::default().with_standing_time(1);
        let vehicle = Vehicle::new(VehicleId(1), "v1", 4, "van");
        let candidates = enumerate_candidates(&vehicle.itinerary, &graph, &request, &weights);
        let first = check(candidates.into_iter().next().unwrap(), &vehicle, &graph, &weights)
            .expect("should be feasible");

        let rechecked = check(
            Candidate {
                itinerary: first.itinerary.clone(),
                frozen_len: 0,
                pre_insertion_len: first.pre_insertion_len,
                pre_delay_sum: first.pre_delay_sum,
                pre_distance_sum: first.pre_distance_sum,
            },
            &vehicle,
            &graph,
            &weights,
        )
        .expect("should still be feasible");

        assert_eq!(first.itinerary.stops(), rechecked.itinerary.stops());
    }

    /// When every vehicle has ample seats and delay_max is generous, a lone
    /// request is always accepted — there is no way for feasibility checking
    /// to spuriously reject the trivial case.
    #[test]
    fn accepts_trivially_when_capacity_and_delay_budget_are_ample() {
        let graph = graph();
        let request = Request::new(
            RequestId(1),
            StationId(1),
            StationId(2),
            1,
            100,
            50,
            1000,
            &graph,
        )
        .unwrap();
        let weights = DispatchWeights::default().with_delay_max(1000);
        let vehicle = Vehicle::new(VehicleId(1), "v1", 8, "van");
        let candidates = enumerate_candidates(&vehicle.itinerary, &graph, &request, &weights);
        assert!(!candidates.is_empty());
        let feasible = check(candidates.into_iter().next().unwrap(), &vehicle, &graph, &weights);
        assert!(feasible.is_some());
    }
}
