//! The immutable unit of rider demand.

use crate::error::CoreError;
use crate::graph::{StationGraph, StationId};
use crate::time::Minutes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

/// A rider's demand for transport from `origin` to `destination`, promised
/// for `promised_time`. Immutable once constructed; validated at the
/// boundary so the core never has to handle a malformed request mid-dispatch.
#[derive(Debug, Clone, Copy)]
pub struct Request {
    pub id: RequestId,
    pub origin: StationId,
    pub destination: StationId,
    pub passengers: u32,
    pub promised_time: Minutes,
    pub created_time: Minutes,
    pub max_delay: u32,
    pub direct_travel: Minutes,
}

impl Request {
    /// Construct and validate a request against the station graph.
    ///
    /// `direct_travel` is derived from the graph rather than trusted from
    /// the caller, since it must always equal `travel_time(origin, destination)`.
    pub fn new(
        id: RequestId,
        origin: StationId,
        destination: StationId,
        passengers: u32,
        promised_time: Minutes,
        created_time: Minutes,
        max_delay: u32,
        graph: &StationGraph,
    ) -> Result<Self, CoreError> {
        if passengers == 0 {
            return Err(CoreError::InvalidRequest {
                request_id: id.0,
                reason: "passengers must be at least 1".into(),
            });
        }
        if created_time > promised_time {
            return Err(CoreError::InvalidRequest {
                request_id: id.0,
                reason: "created_time must not be after promised_time".into(),
            });
        }
        let direct_travel = graph.travel_time(origin, destination).ok_or_else(|| {
            CoreError::MissingEdge {
                from: origin.to_string(),
                to: destination.to_string(),
            }
        })?;
        Ok(Request {
            id,
            origin,
            destination,
            passengers,
            promised_time,
            created_time,
            max_delay,
            direct_travel,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::StationGraph;

    fn graph() -> StationGraph {
        StationGraph::builder()
            .with_travel_time(StationId(1), StationId(2), 10)
            .with_distance(StationId(1), StationId(2), 5.0)
            .build()
    }

    #[test]
    fn rejects_zero_passengers() {
        let err = Request::new(
            RequestId(1),
            StationId(1),
            StationId(2),
            0,
            100,
            90,
            5,
            &graph(),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidRequest { .. }));
    }

    #[test]
    fn rejects_created_after_promised() {
        let err = Request::new(
            RequestId(1),
            StationId(1),
            StationId(2),
            1,
            100,
            110,
            5,
            &graph(),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidRequest { .. }));
    }

    #[test]
    fn derives_direct_travel_from_graph() {
        let request = Request::new(
            RequestId(1),
            StationId(1),
            StationId(2),
            2,
            100,
            95,
            5,
            &graph(),
        )
        .unwrap();
        assert_eq!(request.direct_travel, 10);
    }
}
