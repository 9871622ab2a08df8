//! Candidate generation: for one (vehicle, request) pair, produce every
//! itinerary that results from inserting the request's pickup and dropoff
//! stops at some pair of positions in the vehicle's still-mutable tail.
//!
//! The source encoded insertion positions by multiplying existing schedule
//! indices by three and letting new stops occupy the gaps, then re-sorting
//! the whole frame. Here positions are just `usize` indices into an ordered
//! `Vec<Stop>`; there is no index identity to preserve across a sort.

use crate::config::DispatchWeights;
use crate::graph::StationGraph;
use crate::itinerary::{Itinerary, Stop};
use crate::request::Request;

/// A candidate itinerary produced by the enumerator, still unvalidated.
/// Carries the bookkeeping the scorer needs: the full candidate itinerary,
/// where the vehicle's frozen history ends within it, and the vehicle's
/// pre-insertion delay/distance sums.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub itinerary: Itinerary,
    pub frozen_len: usize,
    pub pre_insertion_len: usize,
    pub pre_delay_sum: u32,
    pub pre_distance_sum: f64,
}

/// Extra minutes added to `W_max` when deriving the cutoff for the mutable
/// tail, matching the source's fixed five-minute safety margin.
const CUTOFF_MARGIN: crate::time::Minutes = 5;

/// Enumerate every candidate insertion of `request`'s pickup and dropoff
/// into `itinerary`.
pub fn enumerate_candidates(
    itinerary: &Itinerary,
    graph: &StationGraph,
    request: &Request,
    weights: &DispatchWeights,
) -> Vec<Candidate> {
    let pre_insertion_len = itinerary.len();
    let pre_delay_sum: u32 = itinerary.stops().iter().map(|s| s.delay).sum();
    let pre_distance_sum = consecutive_distance_sum(itinerary.stops(), graph);

    let pickup = Stop {
        station: request.origin,
        boarding: request.passengers as i32,
        promised_time: request.promised_time,
        request_id: request.id,
        planned_time: request.promised_time,
        delay: 0,
        occupation: 0,
        max_delay: request.max_delay,
    };
    let dropoff = Stop {
        station: request.destination,
        boarding: -(request.passengers as i32),
        promised_time: request.promised_time + request.direct_travel + weights.standing_time,
        request_id: request.id,
        planned_time: 0,
        delay: 0,
        occupation: 0,
        max_delay: request.max_delay,
    };

    let cutoff = request.promised_time - (graph.max_travel_time() + CUTOFF_MARGIN);
    let frozen_len = itinerary.window_start(cutoff);
    let window = &itinerary.stops()[frozen_len..];

    if window.is_empty() {
        let mut stops = itinerary.stops()[..frozen_len].to_vec();
        stops.push(pickup);
        stops.push(dropoff);
        return vec![Candidate {
            itinerary: Itinerary::from_stops(stops),
            frozen_len,
            pre_insertion_len,
            pre_delay_sum,
            pre_distance_sum,
        }];
    }

    let relevant_limit = request.promised_time + request.direct_travel + weights.delay_max_minutes();
    let max_relevant_pos = window
        .iter()
        .enumerate()
        .filter(|(_, s)| s.promised_time < relevant_limit)
        .map(|(i, _)| i)
        .max();
    let Some(max_relevant_pos) = max_relevant_pos else {
        return Vec::new();
    };

    // Gap positions 0..=max_gap are eligible; "extended by two" beyond the
    // last relevant stop so the pair may also be appended after it.
    let max_gap = max_relevant_pos + 2;

    let mut candidates = Vec::with_capacity((max_gap + 1) * (max_gap + 2) / 2);
    for i in 0..=max_gap {
        for j in i..=max_gap {
            let new_window = insert_two(window, i, j, pickup, dropoff);
            let mut stops = itinerary.stops()[..frozen_len].to_vec();
            stops.extend(new_window);
            candidates.push(Candidate {
                itinerary: Itinerary::from_stops(stops),
                frozen_len,
                pre_insertion_len,
                pre_delay_sum,
                pre_distance_sum,
            });
        }
    }
    candidates
}

/// Insert `pickup` at gap `i` and `dropoff` at gap `j >= i` into `original`,
/// where a gap index is "before `original[k]`" (clamped to the end if the
/// index runs past `original.len()`). When `i == j` the pickup and dropoff
/// land back to back, pickup first.
fn insert_two(original: &[Stop], i: usize, j: usize, pickup: Stop, dropoff: Stop) -> Vec<Stop> {
    let i = i.min(original.len());
    let j = j.min(original.len());
    let mut out = Vec::with_capacity(original.len() + 2);
    out.extend_from_slice(&original[..i]);
    out.push(pickup);
    if j == i {
        out.push(dropoff);
        out.extend_from_slice(&original[i..]);
    } else {
        out.extend_from_slice(&original[i..j]);
        out.push(dropoff);
        out.extend_from_slice(&original[j..]);
    }
    out
}

fn consecutive_distance_sum(stops: &[Stop], graph: &StationGraph) -> f64 {
    stops
        .windows(2)
        .map(|w| graph.distance(w[0].station, w[1].station).unwrap_or(0.0))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::StationId;
    use crate::request::RequestId;

    fn graph() -> StationGraph {
        StationGraph::builder()
            .with_travel_time(StationId(1), StationId(2), 10)
            .with_travel_time(StationId(2), StationId(1), 10)
            .with_distance(StationId(1), StationId(2), 5.0)
            .with_distance(StationId(2), StationId(1), 5.0)
            .build()
    }

    fn request() -> Request {
        Request::new(
            RequestId(1),
            StationId(1),
            StationId(2),
            2,
            100,
            95,
            5,
            &graph(),
        )
        .unwrap()
    }

    #[test]
    fn empty_itinerary_yields_single_two_stop_candidate() {
        let itinerary = Itinerary::new();
        let weights = DispatchWeights::default();
        let candidates = enumerate_candidates(&itinerary, &graph(), &request(), &weights);
        assert_eq!(candidates.len(), 1);
        let stops = candidates[0].itinerary.stops();
        assert_eq!(stops.len(), 2);
        assert!(stops[0].is_pickup());
        assert!(stops[1].is_dropoff());
        assert_eq!(stops[0].planned_time, 100);
    }

    #[test]
    fn insert_two_places_dropoff_immediately_after_pickup_when_gaps_match() {
        let pickup = Stop {
            station: StationId(9),
            boarding: 1,
            promised_time: 0,
            request_id: RequestId(1),
            planned_time: 0,
            delay: 0,
            occupation: 0,
            max_delay: 0,
        };
        let dropoff = Stop {
            boarding: -1,
            ..pickup
        };
        let original = vec![pickup, pickup, pickup];
        let out = insert_two(&original, 1, 1, pickup, dropoff);
        assert_eq!(out.len(), 5);
        assert!(out[1].is_pickup());
        assert!(out[2].is_dropoff());
    }
}
