//! Batch evaluation of many pixel offsets against one reference orbit.
//!
//! Converts the reference once up front, then fans the pixels out over the
//! rayon thread pool. Results keep the order of the input offsets.

use deltaorbit_core::{EscapeTrace, PerturbationError, ReferenceOrbit, StandardComplex};
use rayon::prelude::*;

use super::pixel::iterate_delta;
use super::DeltaOrbitIterator;

/// Summary over a finished batch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchStats {
    pub pixels: usize,
    pub escaped: usize,
    pub glitched: usize,
    pub rebases: u64,
}

impl BatchStats {
    pub fn from_traces(traces: &[EscapeTrace]) -> Self {
        traces.iter().fold(
            Self {
                pixels: traces.len(),
                ..Default::default()
            },
            |mut stats, trace| {
                stats.escaped += usize::from(trace.escaped());
                stats.glitched += usize::from(trace.glitched);
                stats.rebases += u64::from(trace.rebase_count);
                stats
            },
        )
    }
}

impl DeltaOrbitIterator<'_> {
    /// Escape iterations for every offset in `deltas`, in input order.
    pub fn compute_escape_batch(
        &self,
        orbit: &ReferenceOrbit,
        deltas: &[StandardComplex],
        max_iterations: u32,
    ) -> Result<Vec<Option<u32>>, PerturbationError> {
        Ok(self
            .compute_escape_batch_with_trace(orbit, deltas, max_iterations)?
            .into_iter()
            .map(|trace| trace.escape_iteration)
            .collect())
    }

    /// Traces for every offset in `deltas`, in input order.
    pub fn compute_escape_batch_with_trace(
        &self,
        orbit: &ReferenceOrbit,
        deltas: &[StandardComplex],
        max_iterations: u32,
    ) -> Result<Vec<EscapeTrace>, PerturbationError> {
        orbit.validate()?;
        // Convert before fanning out so workers only ever read the table
        let converted = self
            .cache()
            .get_standard_precision_orbit(orbit, orbit.len());
        let reference = converted.points();
        let tau_sq = self.config().tau_sq;

        let traces: Vec<EscapeTrace> = deltas
            .par_iter()
            .map(|&delta_c| iterate_delta(reference, delta_c, max_iterations, tau_sq))
            .collect();

        if log::log_enabled!(log::Level::Debug) {
            let stats = BatchStats::from_traces(&traces);
            log::debug!(
                "Batch against {}: {} pixels, {} escaped, {} glitched, {} rebases",
                orbit.id(),
                stats.pixels,
                stats.escaped,
                stats.glitched,
                stats.rebases
            );
        }

        Ok(traces)
    }
}

/// `DeltaOrbitIterator::compute_escape_batch` against the process-wide cache.
pub fn compute_escape_batch(
    orbit: &ReferenceOrbit,
    deltas: &[StandardComplex],
    max_iterations: u32,
) -> Result<Vec<Option<u32>>, PerturbationError> {
    DeltaOrbitIterator::global().compute_escape_batch(orbit, deltas, max_iterations)
}
