//! The dispatcher: drives enumerate -> feasibility -> score -> commit/deny
//! for a stream of requests, sequentially and in input order.

use crate::config::DispatchWeights;
use crate::feasibility::{self, FeasibleCandidate};
use crate::graph::StationGraph;
use crate::insertion::enumerate_candidates;
use crate::request::{Request, RequestId};
use crate::scoring::select_winner;
use crate::vehicle::Vehicle;

/// The outcome of dispatching a full request stream: the final fleet state
/// (each vehicle's committed itinerary) plus the requests that could not be
/// served.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub denied: Vec<RequestId>,
}

/// A caller-supplied progress hook. Advisory only, per the design: it must
/// never influence which candidate wins or which requests are denied.
pub type ProgressHook<'a> = dyn FnMut(usize, usize) + 'a;

/// Dispatch `requests` against `vehicles` in order, mutating each vehicle's
/// itinerary in place as requests are committed. Requests must already be
/// sorted the way the producer promises (`created_time` ascending for
/// replay, `promised_time` ascending for synthetic demand).
pub fn dispatch_all(
    vehicles: &mut [Vehicle],
    requests: &[Request],
    graph: &StationGraph,
    weights: &DispatchWeights,
    mut progress: Option<&mut ProgressHook<'_>>,
) -> DispatchOutcome {
    let mut denied = Vec::new();
    let total = requests.len();

    for (index, request) in requests.iter().enumerate() {
        if let Some(hook) = progress.as_deref_mut() {
            hook(index, total);
        }

        let mut feasible: Vec<FeasibleCandidate> = Vec::new();
        for (vehicle_index, vehicle) in vehicles.iter().enumerate() {
            let candidates = enumerate_candidates(&vehicle.itinerary, graph, request, weights);
            for candidate in candidates {
                if let Some(mut survivor) = feasibility::check(candidate, vehicle, graph, weights) {
                    survivor.vehicle_index = vehicle_index;
                    feasible.push(survivor);
                }
            }
        }

        if feasible.is_empty() {
            denied.push(request.id);
            continue;
        }

        let winner_index = select_winner(&feasible, weights, |c| {
            c.itinerary
                .stops()
                .windows(2)
                .map(|w| graph.distance(w[0].station, w[1].station).unwrap_or(0.0))
                .sum()
        })
        .expect("feasible set is non-empty");

        let winner = &feasible[winner_index];
        vehicles[winner.vehicle_index].itinerary.commit(winner.itinerary.clone());
    }

    if let Some(hook) = progress.as_deref_mut() {
        hook(total, total);
    }

    DispatchOutcome { denied }
}
