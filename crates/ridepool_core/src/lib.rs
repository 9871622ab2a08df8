//! # Ride-Pooling Dispatch Core
//!
//! An online insertion scheduler for a fleet of shared-ride vehicles. For
//! each incoming request, in order, the [`dispatch`] module enumerates
//! candidate insertions of the request's pickup and dropoff into every
//! vehicle's current itinerary ([`insertion`]), discards candidates that
//! violate capacity or delay ([`feasibility`]), scores the survivors on a
//! weighted blend of delay growth, fleet balance, pooling, and distance
//! growth ([`scoring`]), and commits the winner to its vehicle.
//!
//! This crate has no file I/O, no configuration parsing, and no CLI: those
//! live in `ridepool_io` and `ridepool_cli`. It is the hard, educative part
//! of the simulator, kept deliberately small and dependency-free.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod feasibility;
pub mod graph;
pub mod insertion;
pub mod itinerary;
pub mod request;
pub mod scoring;
pub mod time;
pub mod vehicle;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
