//! High-precision reference orbit as handed over by the orbit generator.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::{HighPrecisionPoint, PerturbationError};

static NEXT_ORBIT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a `ReferenceOrbit`.
///
/// Caches key on this, never on the orbit's contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrbitId(u64);

impl OrbitId {
    fn next() -> Self {
        Self(NEXT_ORBIT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for OrbitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "orbit#{}", self.0)
    }
}

/// Iterates X_0 … X_N of the Mandelbrot recurrence at the reference point.
///
/// Not `Clone`: every instance carries its own identity, share it by
/// reference or `Arc` instead.
#[derive(Debug)]
pub struct ReferenceOrbit {
    id: OrbitId,
    points: Vec<HighPrecisionPoint>,
}

impl ReferenceOrbit {
    pub fn new(points: Vec<HighPrecisionPoint>) -> Self {
        Self {
            id: OrbitId::next(),
            points,
        }
    }

    pub fn id(&self) -> OrbitId {
        self.id
    }

    pub fn points(&self) -> &[HighPrecisionPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Delta iteration pairs every step with a following point, so fewer
    /// than two points cannot be iterated against.
    pub fn validate(&self) -> Result<(), PerturbationError> {
        if self.points.len() < 2 {
            return Err(PerturbationError::InvalidReferenceOrbit {
                len: self.points.len(),
            });
        }
        Ok(())
    }
}

impl FromIterator<HighPrecisionPoint> for ReferenceOrbit {
    fn from_iter<I: IntoIterator<Item = HighPrecisionPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
