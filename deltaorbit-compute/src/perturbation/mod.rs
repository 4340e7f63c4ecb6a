//! Perturbation theory computation for deep Mandelbrot zoom.
//!
//! Reference orbits arrive at high precision and are narrowed to f64 once,
//! then every pixel runs fast f64 delta iterations against that table.

mod batch;
mod pixel;
mod reference_orbit;

pub use batch::{compute_escape_batch, BatchStats};
pub use pixel::{compute_escape, compute_escape_with_trace, DeltaOrbitIterator};
pub use reference_orbit::{ConvertedOrbit, ReferenceOrbitCache};

#[cfg(test)]
mod tests;
