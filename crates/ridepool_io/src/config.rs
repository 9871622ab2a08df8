//! Scenario configuration, loaded from a single TOML document.
//!
//! The original tool used an INI file parsed section by section
//! (`[basic]`, `[files]`, `[pooling]`, `[order_behaviour]`, `[outputs]`).
//! TOML keeps that same section shape while giving us typed, validated
//! deserialization instead of a flat string-keyed dict.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Deserialize;

use ridepool_core::config::DispatchWeights;

use crate::error::IoError;

#[derive(Debug, Clone, Deserialize)]
pub struct BasicConfig {
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub requests_from_csv: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    pub distance_path: PathBuf,
    pub waytime_path: PathBuf,
    pub vehicles_path: PathBuf,
    #[serde(default)]
    pub requests_path: Option<PathBuf>,
    #[serde(default)]
    pub demand_path: Option<PathBuf>,
    #[serde(default)]
    pub station_probability_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PoolingWeights {
    pub delay_factor: f64,
    pub balance_factor: f64,
    pub pooling_factor: f64,
    pub distance_factor: f64,
    pub delay_max: u32,
    pub standing_time: i64,
}

fn default_passenger_distribution() -> Vec<f64> {
    // The source's hardcoded seats-1..=6 distribution, now overridable.
    vec![0.61, 0.25, 0.05, 0.05, 0.025, 0.015]
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderBehaviourConfig {
    /// Probability a request is placed "now" (a few minutes before pickup)
    /// rather than further ahead.
    pub order_behaviour: f64,
    pub order_ahead_min: i64,
    pub order_ahead_max: i64,
    pub demand_factor: f64,
    #[serde(default = "default_passenger_distribution")]
    pub passenger_distribution: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputsConfig {
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioConfig {
    pub basic: BasicConfig,
    pub files: FilesConfig,
    pub pooling: PoolingWeights,
    #[serde(default)]
    pub order_behaviour: Option<OrderBehaviourConfig>,
    pub outputs: OutputsConfig,
}

impl ScenarioConfig {
    pub fn from_path(path: &Path) -> Result<Self, IoError> {
        let text = std::fs::read_to_string(path)?;
        let config: ScenarioConfig = toml::from_str(&text)?;
        if !config.basic.requests_from_csv && config.order_behaviour.is_none() {
            return Err(IoError::Config(
                "synthetic demand selected but [order_behaviour] section is missing".into(),
            ));
        }
        Ok(config)
    }

    /// The slice of configuration the core dispatcher actually reads.
    pub fn dispatch_weights(&self) -> DispatchWeights {
        DispatchWeights::default()
            .with_delay_factor(self.pooling.delay_factor)
            .with_balance_factor(self.pooling.balance_factor)
            .with_pooling_factor(self.pooling.pooling_factor)
            .with_distance_factor(self.pooling.distance_factor)
            .with_delay_max(self.pooling.delay_max)
            .with_standing_time(self.pooling.standing_time)
    }
}
