//! The per-vehicle ordered sequence of stops, and the operations the
//! dispatcher uses to snapshot, replan, and commit it.

use crate::graph::StationId;
use crate::request::RequestId;
use crate::time::Minutes;

/// A single pickup or dropoff pinned to a position in a vehicle's itinerary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stop {
    pub station: StationId,
    /// Positive: pickup of this many passengers. Negative: dropoff.
    pub boarding: i32,
    pub promised_time: Minutes,
    pub request_id: RequestId,
    pub planned_time: Minutes,
    pub delay: u32,
    /// Cumulative passengers on board after this stop is serviced.
    pub occupation: i32,
    /// Per-stop tolerated delay, inherited from the owning request. Kept for
    /// data completeness; the feasibility gate enforced during dispatch uses
    /// the scenario-wide `weights.delay_max`, not this field (see DESIGN.md).
    pub max_delay: u32,
}

impl Stop {
    pub fn is_pickup(&self) -> bool {
        self.boarding > 0
    }

    pub fn is_dropoff(&self) -> bool {
        self.boarding < 0
    }
}

/// A vehicle's ordered sequence of stops. Owned exclusively by its vehicle;
/// mutated only through [`Itinerary::commit`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Itinerary {
    stops: Vec<Stop>,
}

impl Itinerary {
    pub fn new() -> Self {
        Itinerary { stops: Vec::new() }
    }

    pub fn from_stops(stops: Vec<Stop>) -> Self {
        Itinerary { stops }
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// An immutable view usable for enumeration; itineraries are cheap to
    /// clone (plain `Vec<Stop>`), so a snapshot is just a clone.
    pub fn snapshot(&self) -> Itinerary {
        self.clone()
    }

    /// Atomically replace the current stops with `new_itinerary`. Callers
    /// (the dispatcher) are responsible for having produced an itinerary
    /// that already satisfies every invariant in the data model.
    pub fn commit(&mut self, new_itinerary: Itinerary) {
        self.stops = new_itinerary.stops;
    }

    /// The index of the first stop whose `planned_time > cutoff`, i.e. the
    /// boundary between frozen history and the mutable tail. Stops are
    /// sorted non-decreasing by `planned_time` (invariant 1), so this is a
    /// partition point.
    pub fn window_start(&self, cutoff: Minutes) -> usize {
        self.stops.partition_point(|s| s.planned_time <= cutoff)
    }

    /// The suffix of stops whose `planned_time > cutoff`.
    pub fn recent_window(&self, cutoff: Minutes) -> &[Stop] {
        &self.stops[self.window_start(cutoff)..]
    }

    /// Mutable access to the stop vector, for the feasibility checker's
    /// in-place replanning pass. Not exposed outside the crate.
    pub(crate) fn stops_mut(&mut self) -> &mut Vec<Stop> {
        &mut self.stops
    }
}
