//! Similarity engine configuration
//!
//! The blend weights and the negative z-score fallback are empirical
//! heuristics, so they live here as tunable parameters instead of constants
//! inside the engine.

use serde::{Deserialize, Serialize};

/// Weights of the ideal-profile blend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BlendWeights {
    /// Cosine similarity of the jointly standardized vectors
    #[serde(default = "default_z_cosine")]
    pub z_cosine: f64,

    /// `1 / (1 + d)` on the standardized vectors
    #[serde(default = "default_z_euclidean")]
    pub z_euclidean: f64,

    /// Clamped Pearson correlation on the standardized vectors
    #[serde(default = "default_z_correlation")]
    pub z_correlation: f64,

    /// Cosine similarity of the raw vectors
    #[serde(default = "default_raw_cosine")]
    pub raw_cosine: f64,
}

fn default_z_cosine() -> f64 {
    0.5
}

fn default_z_euclidean() -> f64 {
    0.2
}

fn default_z_correlation() -> f64 {
    0.2
}

fn default_raw_cosine() -> f64 {
    0.1
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            z_cosine: default_z_cosine(),
            z_euclidean: default_z_euclidean(),
            z_correlation: default_z_correlation(),
            raw_cosine: default_raw_cosine(),
        }
    }
}

impl BlendWeights {
    fn named(&self) -> [(&'static str, f64); 4] {
        [
            ("z_cosine", self.z_cosine),
            ("z_euclidean", self.z_euclidean),
            ("z_correlation", self.z_correlation),
            ("raw_cosine", self.raw_cosine),
        ]
    }

    pub fn total(&self) -> f64 {
        self.z_cosine + self.z_euclidean + self.z_correlation + self.raw_cosine
    }

    /// Validate the weights
    /// - Checks that weights are finite and non-negative
    /// - Normalizes weights to sum to 1.0 if they don't
    pub fn validate_and_normalize(&mut self) -> Result<(), ConfigError> {
        for (name, weight) in self.named() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::NegativeWeight(name));
            }
        }

        let weight_sum = self.total();
        if weight_sum <= 0.0 {
            return Err(ConfigError::ZeroTotalWeight);
        }

        if (weight_sum - 1.0).abs() > 0.001 {
            self.z_cosine /= weight_sum;
            self.z_euclidean /= weight_sum;
            self.z_correlation /= weight_sum;
            self.raw_cosine /= weight_sum;
        }

        Ok(())
    }
}

/// Engine-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    #[serde(default)]
    pub weights: BlendWeights,

    /// Return raw cosine instead of the blend when the standardized cosine is
    /// negative or undefined
    #[serde(default = "default_fallback")]
    pub fallback_on_negative_z_cosine: bool,

    /// Upper bound on references used by the ranked-favorites modes
    #[serde(default = "default_max_references")]
    pub max_references: usize,
}

fn default_fallback() -> bool {
    true
}

fn default_max_references() -> usize {
    3
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: BlendWeights::default(),
            fallback_on_negative_z_cosine: default_fallback(),
            max_references: default_max_references(),
        }
    }
}

impl EngineConfig {
    pub fn validate_and_normalize(&mut self) -> Result<(), ConfigError> {
        if self.max_references == 0 {
            return Err(ConfigError::ZeroMaxReferences);
        }
        self.weights.validate_and_normalize()
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let mut config: EngineConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate_and_normalize()?;
        Ok(config)
    }
}

/// Errors that can occur during config validation
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Weight '{0}' must be finite and non-negative")]
    NegativeWeight(&'static str),

    #[error("Total weight cannot be zero")]
    ZeroTotalWeight,

    #[error("max_references must be at least 1")]
    ZeroMaxReferences,

    #[error("Invalid config: {0}")]
    Parse(String),
}
