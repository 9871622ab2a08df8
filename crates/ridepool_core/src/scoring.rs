//! Normalise the four per-candidate metrics across the feasible set and pick
//! the highest-scoring candidate, breaking ties by first-encountered order.

use crate::config::DispatchWeights;
use crate::feasibility::FeasibleCandidate;

/// The four raw, un-normalised deltas for one feasible candidate.
#[derive(Debug, Clone, Copy)]
struct RawMetrics {
    delta_delay: f64,
    balance: f64,
    pool: f64,
    delta_distance: f64,
}

fn raw_metrics(candidate: &FeasibleCandidate) -> RawMetrics {
    let delay_sum: u32 = candidate.itinerary.stops().iter().map(|s| s.delay).sum();
    RawMetrics {
        delta_delay: delay_sum as f64 - candidate.pre_delay_sum as f64,
        balance: candidate.pre_insertion_len as f64,
        pool: candidate.pooling_rate,
        delta_distance: 0.0, // overwritten by select_winner using `distance_of`
    }
}

/// Pick the winning feasible candidate among `candidates`, or `None` if the
/// set is empty. `distance_of` computes the total consecutive-stop distance
/// of a candidate's itinerary (kept as a callback so this module does not
/// need a `StationGraph` reference of its own).
pub fn select_winner<F>(
    candidates: &[FeasibleCandidate],
    weights: &DispatchWeights,
    distance_of: F,
) -> Option<usize>
where
    F: Fn(&FeasibleCandidate) -> f64,
{
    if candidates.is_empty() {
        return None;
    }

    let metrics: Vec<RawMetrics> = candidates
        .iter()
        .map(|c| {
            let mut m = raw_metrics(c);
            m.delta_distance = distance_of(c) - c.pre_distance_sum;
            m
        })
        .collect();

    let max_delta_delay = metrics.iter().map(|m| m.delta_delay).fold(f64::MIN, f64::max);
    let max_balance = metrics.iter().map(|m| m.balance).fold(f64::MIN, f64::max);
    let max_pool = metrics.iter().map(|m| m.pool).fold(f64::MIN, f64::max);
    let max_delta_distance = metrics.iter().map(|m| m.delta_distance).fold(f64::MIN, f64::max);

    let mut best_index = 0;
    let mut best_score = f64::MIN;
    for (index, m) in metrics.iter().enumerate() {
        let delay_score = if max_delta_delay > 0.0 {
            1.0 - m.delta_delay / max_delta_delay
        } else {
            1.0
        };
        let balance_score = if max_balance > 0.0 {
            1.0 - m.balance / max_balance
        } else {
            1.0
        };
        let pool_score = if max_pool > 0.0 { m.pool / max_pool } else { 0.0 };
        let dist_score = if max_delta_distance > 0.0 {
            1.0 - m.delta_distance / max_delta_distance
        } else {
            1.0
        };

        let score = weights.delay_factor * delay_score
            + weights.balance_factor * balance_score
            + weights.pooling_factor * pool_score
            + weights.distance_factor * dist_score;

        if score > best_score {
            best_score = score;
            best_index = index;
        }
    }
    Some(best_index)
}
