//! Standard-precision view of reference orbits.
//!
//! Narrows a high-precision `ReferenceOrbit` to f64 once and memoizes the
//! result by orbit identity, so every pixel evaluated against the same
//! reference shares one lookup table.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use deltaorbit_core::{OrbitId, ReferenceOrbit, StandardComplex};

/// f64 reference orbit values X_0 … X_{n-1}. Immutable once published.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvertedOrbit {
    points: Vec<StandardComplex>,
}

impl ConvertedOrbit {
    fn convert(orbit: &ReferenceOrbit, length: usize) -> Self {
        Self {
            points: orbit.points()[..length]
                .iter()
                .map(|p| p.to_standard())
                .collect(),
        }
    }

    pub fn points(&self) -> &[StandardComplex] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Memoized f64 conversions keyed by `OrbitId`.
///
/// The cache never holds the `ReferenceOrbit` itself. Whoever owns an
/// orbit calls `retire` when dropping it to release the conversion.
#[derive(Debug, Default)]
pub struct ReferenceOrbitCache {
    entries: RwLock<HashMap<OrbitId, Arc<ConvertedOrbit>>>,
    conversions: AtomicU64,
}

impl ReferenceOrbitCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache used by the free-function entry points.
    pub fn global() -> &'static ReferenceOrbitCache {
        static GLOBAL: OnceLock<ReferenceOrbitCache> = OnceLock::new();
        GLOBAL.get_or_init(ReferenceOrbitCache::new)
    }

    /// Get the f64 conversion of `orbit`, holding at least `min_length`
    /// points (or the whole orbit if it is shorter).
    ///
    /// A missing or too-short entry is replaced by a fresh conversion of the
    /// first `min(orbit.len(), min_length)` points. Concurrent first access
    /// converts once: the write path re-checks before converting.
    pub fn get_standard_precision_orbit(
        &self,
        orbit: &ReferenceOrbit,
        min_length: usize,
    ) -> Arc<ConvertedOrbit> {
        let id = orbit.id();
        // An orbit never grows, so a full conversion satisfies any longer request
        let length = orbit.len().min(min_length);

        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(converted) = entries.get(&id) {
                if converted.len() >= length {
                    return Arc::clone(converted);
                }
            }
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(converted) = entries.get(&id) {
            if converted.len() >= length {
                return Arc::clone(converted);
            }
        }

        log::debug!("Converting {id} to f64 ({length} of {} points)", orbit.len());
        let converted = Arc::new(ConvertedOrbit::convert(orbit, length));
        self.conversions.fetch_add(1, Ordering::Relaxed);
        entries.insert(id, Arc::clone(&converted));
        converted
    }

    /// Drop the conversion for a retired orbit. Returns whether one existed.
    ///
    /// Readers still holding the `Arc` keep a valid table.
    pub fn retire(&self, id: OrbitId) -> bool {
        let removed = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some();
        if removed {
            log::debug!("Retired cached conversion of {id}");
        }
        removed
    }

    /// Number of conversions performed since this cache was created.
    pub fn conversion_count(&self) -> u64 {
        self.conversions.load(Ordering::Relaxed)
    }

    pub fn contains(&self, id: OrbitId) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
