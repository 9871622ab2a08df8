//! CSV/JSON/TOML adapters around `ridepool_core`: configuration parsing,
//! tabular matrix and request loading, synthetic demand generation, and
//! result export. No dispatch logic lives here.

pub mod config;
pub mod demand;
pub mod error;
pub mod export;
pub mod stations;
pub mod tables;
