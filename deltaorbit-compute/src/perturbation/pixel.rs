//! Per-pixel perturbation iteration.
//!
//! Advances δz' = 2·X_m·δz + δz² + δc against a shared f64 reference orbit,
//! re-anchoring δz onto the combined orbit whenever it stops being small or
//! the reference runs out of points.

use deltaorbit_core::{
    EscapeTrace, PerturbationConfig, PerturbationError, ReferenceOrbit, StandardComplex,
};

use super::ReferenceOrbitCache;

/// Escape threshold on |Z|². Strict: |Z|² == 4 does not escape.
const BAILOUT_NORM_SQ: f64 = 4.0;

/// Reference points smaller than this are skipped by glitch detection.
const GLITCH_MIN_REF_NORM_SQ: f64 = 1e-20;

/// Evaluates pixel offsets against reference orbits, converting each orbit
/// through a `ReferenceOrbitCache` on first use.
#[derive(Clone, Copy, Debug)]
pub struct DeltaOrbitIterator<'c> {
    cache: &'c ReferenceOrbitCache,
    config: PerturbationConfig,
}

impl DeltaOrbitIterator<'static> {
    /// Iterator backed by the process-wide cache and default config.
    pub fn global() -> Self {
        Self::new(ReferenceOrbitCache::global())
    }
}

impl<'c> DeltaOrbitIterator<'c> {
    pub fn new(cache: &'c ReferenceOrbitCache) -> Self {
        Self {
            cache,
            config: PerturbationConfig::default(),
        }
    }

    pub fn with_config(cache: &'c ReferenceOrbitCache, config: PerturbationConfig) -> Self {
        Self { cache, config }
    }

    pub fn cache(&self) -> &'c ReferenceOrbitCache {
        self.cache
    }

    pub fn config(&self) -> &PerturbationConfig {
        &self.config
    }

    /// Escape iteration (1-based) for the pixel at `delta_c` from the
    /// reference, or None if it stays bounded for `max_iterations` steps.
    pub fn compute_escape(
        &self,
        orbit: &ReferenceOrbit,
        delta_c: StandardComplex,
        max_iterations: u32,
    ) -> Result<Option<u32>, PerturbationError> {
        Ok(self
            .compute_escape_with_trace(orbit, delta_c, max_iterations)?
            .escape_iteration)
    }

    /// Like `compute_escape`, also reporting the final delta and diagnostics.
    pub fn compute_escape_with_trace(
        &self,
        orbit: &ReferenceOrbit,
        delta_c: StandardComplex,
        max_iterations: u32,
    ) -> Result<EscapeTrace, PerturbationError> {
        orbit.validate()?;
        let converted = self.cache.get_standard_precision_orbit(orbit, orbit.len());
        Ok(iterate_delta(
            converted.points(),
            delta_c,
            max_iterations,
            self.config.tau_sq,
        ))
    }
}

/// `DeltaOrbitIterator::compute_escape` against the process-wide cache.
pub fn compute_escape(
    orbit: &ReferenceOrbit,
    delta_c: StandardComplex,
    max_iterations: u32,
) -> Result<Option<u32>, PerturbationError> {
    DeltaOrbitIterator::global().compute_escape(orbit, delta_c, max_iterations)
}

/// `DeltaOrbitIterator::compute_escape_with_trace` against the process-wide cache.
pub fn compute_escape_with_trace(
    orbit: &ReferenceOrbit,
    delta_c: StandardComplex,
    max_iterations: u32,
) -> Result<EscapeTrace, PerturbationError> {
    DeltaOrbitIterator::global().compute_escape_with_trace(orbit, delta_c, max_iterations)
}

/// The single stepping routine behind every public entry point.
///
/// `reference` must hold at least 2 points. `m` never exceeds
/// `reference.len() - 1`: it is reset to 0 as soon as it reaches the last
/// index, so X_m is always read below the last index and X_{m+1} at most at it.
pub(crate) fn iterate_delta(
    reference: &[StandardComplex],
    delta_c: StandardComplex,
    max_iterations: u32,
    tau_sq: f64,
) -> EscapeTrace {
    debug_assert!(reference.len() >= 2, "reference orbit must be validated");
    let last = reference.len() - 1;

    let mut dz = StandardComplex::ZERO;
    let mut m: usize = 0;
    let mut n: u32 = 0;
    let mut glitched = false;
    let mut rebase_count: u32 = 0;

    while n < max_iterations {
        // Delta iteration: δz' = 2·X_m·δz + δz² + δc
        let x_m = reference[m];
        dz = x_m.mul(&dz).scale(2.0).add(&dz.square()).add(&delta_c);
        m += 1;
        n += 1;

        let x_next = reference[m];
        let z = x_next.add(&dz);
        let z_norm_sq = z.norm_sq();

        if z_norm_sq > BAILOUT_NORM_SQ {
            return EscapeTrace {
                escape_iteration: Some(n),
                final_delta: dz,
                glitched,
                rebase_count,
            };
        }

        // Pauldelbrot glitch detection: |Z|² < τ²·|X|²
        let x_norm_sq = x_next.norm_sq();
        if x_norm_sq > GLITCH_MIN_REF_NORM_SQ && z_norm_sq < tau_sq * x_norm_sq {
            glitched = true;
        }

        // Rebase when δz is no longer small relative to Z, or X is exhausted
        if z.norm() < dz.norm() || m == last {
            dz = z;
            m = 0;
            rebase_count += 1;
        }
    }

    EscapeTrace {
        escape_iteration: None,
        final_delta: dz,
        glitched,
        rebase_count,
    }
}
