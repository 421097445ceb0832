//! Tunable constants for field spawning.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Knobs that shape how often fields appear, which kind, and where.
///
/// Every field falls back to its default when missing from a config file,
/// so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Spawn probability gained per 1000 units of universe width.
    pub rate_per_thousand_width: f64,
    /// Floor applied to the width-derived spawn probability.
    pub min_probability: f64,
    /// Chance that a spawned field is a molecular cloud rather than an ion storm.
    pub molecular_cloud_chance: f64,
    pub molecular_cloud_size: f64,
    pub ion_storm_size: f64,
    /// Distance beyond the universe half-width at which fields appear.
    pub ring_offset: f64,
    /// Upper bound (exclusive) of the random extra distance added to the ring.
    pub ring_jitter: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            rate_per_thousand_width: 0.2,
            min_probability: 0.1,
            molecular_cloud_chance: 0.3,
            molecular_cloud_size: 120.0,
            ion_storm_size: 50.0,
            ring_offset: 150.0,
            ring_jitter: 50.0,
        }
    }
}

impl SpawnConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SpawnConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rate_per_thousand_width.is_finite() && self.rate_per_thousand_width >= 0.0) {
            return Err(invalid("rate_per_thousand_width", "must be finite and non-negative"));
        }
        if !(0.0..=1.0).contains(&self.min_probability) {
            return Err(invalid("min_probability", "must be between 0.0 and 1.0"));
        }
        if !(0.0..=1.0).contains(&self.molecular_cloud_chance) {
            return Err(invalid("molecular_cloud_chance", "must be between 0.0 and 1.0"));
        }
        if !is_positive(self.molecular_cloud_size) {
            return Err(invalid("molecular_cloud_size", "must be finite and positive"));
        }
        if !is_positive(self.ion_storm_size) {
            return Err(invalid("ion_storm_size", "must be finite and positive"));
        }
        if !(self.ring_offset.is_finite() && self.ring_offset >= 0.0) {
            return Err(invalid("ring_offset", "must be finite and non-negative"));
        }
        if !(self.ring_jitter.is_finite() && self.ring_jitter >= 0.0) {
            return Err(invalid("ring_jitter", "must be finite and non-negative"));
        }
        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
