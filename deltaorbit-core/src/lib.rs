pub mod bigfloat;
pub mod complex;
pub mod compute_data;
pub mod config;
pub mod error;
pub mod orbit;

pub use bigfloat::BigFloat;
pub use complex::{HighPrecisionPoint, StandardComplex};
pub use compute_data::EscapeTrace;
pub use config::{PerturbationConfig, DEFAULT_PERTURBATION_CONFIG};
pub use error::PerturbationError;
pub use orbit::{OrbitId, ReferenceOrbit};
