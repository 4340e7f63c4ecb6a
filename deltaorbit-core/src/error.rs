//! Error types for perturbation inputs and configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PerturbationError {
    #[error("Reference orbit needs at least 2 points, got {len}")]
    InvalidReferenceOrbit { len: usize },

    #[error("Failed to parse high-precision value: {0}")]
    Parse(String),

    #[error("Invalid perturbation config: {0}")]
    Config(#[from] serde_json::Error),
}
