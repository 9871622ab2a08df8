use std::fmt;

/// Errors raised while validating a request or a station graph before dispatch.
///
/// Mirrors the fatal/non-fatal split in the error handling design: every
/// variant here is a configuration or validation error and aborts the run.
#[derive(Debug)]
pub enum CoreError {
    /// A station referenced by a request or vehicle is absent from the graph.
    UnknownStation(String),
    /// A travel time or distance entry is missing for a pair used by the run.
    MissingEdge { from: String, to: String },
    /// A request failed basic validity checks.
    InvalidRequest { request_id: u64, reason: String },
    /// A vehicle roster entry failed basic validity checks.
    InvalidVehicle { vehicle_id: u64, reason: String },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::UnknownStation(id) => write!(f, "unknown station: {id}"),
            CoreError::MissingEdge { from, to } => {
                write!(f, "missing graph edge from {from} to {to}")
            }
            CoreError::InvalidRequest { request_id, reason } => {
                write!(f, "invalid request {request_id}: {reason}")
            }
            CoreError::InvalidVehicle { vehicle_id, reason } => {
                write!(f, "invalid vehicle {vehicle_id}: {reason}")
            }
        }
    }
}

impl std::error::Error for CoreError {}
