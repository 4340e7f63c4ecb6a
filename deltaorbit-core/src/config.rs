//! Perturbation configuration.
//!
//! Tunables for delta iteration that callers may want to load alongside
//! their render settings. The bailout is not configurable: escape is
//! always |Z|² > 4.

use serde::{Deserialize, Serialize};

use crate::PerturbationError;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerturbationConfig {
    /// Glitch detection threshold squared (τ²).
    /// Default 1e-6 corresponds to τ = 10⁻³ (standard).
    pub tau_sq: f64,
    /// Iteration budget for callers that do not pass one explicitly.
    pub default_max_iterations: u32,
}

impl PerturbationConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, PerturbationError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for PerturbationConfig {
    fn default() -> Self {
        DEFAULT_PERTURBATION_CONFIG
    }
}

pub static DEFAULT_PERTURBATION_CONFIG: PerturbationConfig = PerturbationConfig {
    tau_sq: 1e-6,
    default_max_iterations: 1000,
};
