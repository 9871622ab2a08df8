//! Immutable pairwise travel-time and distance lookup between stations.

use std::collections::HashMap;
use std::fmt;

use crate::error::CoreError;
use crate::time::Minutes;

/// An opaque station identifier. Loaders intern whatever external station
/// names appear in the source tables into these small integers; the core
/// never looks at a station id beyond equality, hashing, and ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub u32);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only pairwise travel time (minutes) and distance (units) between
/// stations. Self-loops are always defined as zero regardless of what the
/// backing tables contain; every other pair used anywhere in a run must be
/// present, or graph construction fails.
#[derive(Debug, Clone, Default)]
pub struct StationGraph {
    travel_time: HashMap<(StationId, StationId), Minutes>,
    distance: HashMap<(StationId, StationId), f64>,
    max_travel_time: Minutes,
}

impl StationGraph {
    pub fn builder() -> StationGraphBuilder {
        StationGraphBuilder::default()
    }

    /// Travel time in minutes from `a` to `b`, or `None` if undefined.
    pub fn travel_time(&self, a: StationId, b: StationId) -> Option<Minutes> {
        if a == b {
            return Some(0);
        }
        self.travel_time.get(&(a, b)).copied()
    }

    /// Distance from `a` to `b`, or `None` if undefined.
    pub fn distance(&self, a: StationId, b: StationId) -> Option<f64> {
        if a == b {
            return Some(0.0);
        }
        self.distance.get(&(a, b)).copied()
    }

    /// The maximum travel time across the whole matrix, `W_max`, used by the
    /// insertion enumerator to size its pruning window.
    pub fn max_travel_time(&self) -> Minutes {
        self.max_travel_time
    }

    /// Verify that every pair in `stations x stations` has both a travel
    /// time and a distance entry. Run once at startup, before dispatch.
    pub fn validate_complete(&self, stations: &[StationId]) -> Result<(), CoreError> {
        for &a in stations {
            for &b in stations {
                if self.travel_time(a, b).is_none() {
                    return Err(CoreError::MissingEdge {
                        from: a.to_string(),
                        to: b.to_string(),
                    });
                }
                if self.distance(a, b).is_none() {
                    return Err(CoreError::MissingEdge {
                        from: a.to_string(),
                        to: b.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Incrementally builds a [`StationGraph`] from individual edges, the way a
/// tabular loader walks a matrix cell by cell.
#[derive(Debug, Clone, Default)]
pub struct StationGraphBuilder {
    travel_time: HashMap<(StationId, StationId), Minutes>,
    distance: HashMap<(StationId, StationId), f64>,
}

impl StationGraphBuilder {
    pub fn with_travel_time(mut self, a: StationId, b: StationId, minutes: Minutes) -> Self {
        self.travel_time.insert((a, b), minutes);
        self
    }

    pub fn with_distance(mut self, a: StationId, b: StationId, distance: f64) -> Self {
        self.distance.insert((a, b), distance);
        self
    }

    pub fn build(self) -> StationGraph {
        let max_travel_time = self.travel_time.values().copied().max().unwrap_or(0);
        StationGraph {
            travel_time: self.travel_time,
            distance: self.distance,
            max_travel_time,
        }
    }
}
