pub mod perturbation;

pub use perturbation::{
    compute_escape, compute_escape_batch, compute_escape_with_trace, BatchStats, ConvertedOrbit,
    DeltaOrbitIterator, ReferenceOrbitCache,
};

// Re-export core types for convenience
pub use deltaorbit_core::*;
