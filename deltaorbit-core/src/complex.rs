//! Complex number types on both sides of the precision boundary.
//!
//! `HighPrecisionPoint` holds reference orbit values as produced by the
//! arbitrary-precision generator. `StandardComplex` is the native f64 type
//! every per-pixel computation runs in.

use serde::{Deserialize, Serialize};

use crate::{BigFloat, PerturbationError};

/// f64 complex number for perturbation delta arithmetic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardComplex {
    pub re: f64,
    pub im: f64,
}

impl StandardComplex {
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    #[inline]
    pub fn add(&self, other: &Self) -> Self {
        Self {
            re: self.re + other.re,
            im: self.im + other.im,
        }
    }

    #[inline]
    pub fn sub(&self, other: &Self) -> Self {
        Self {
            re: self.re - other.re,
            im: self.im - other.im,
        }
    }

    #[inline]
    pub fn mul(&self, other: &Self) -> Self {
        Self {
            re: self.re * other.re - self.im * other.im,
            im: self.re * other.im + self.im * other.re,
        }
    }

    /// Multiply by f64 scalar.
    #[inline]
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            re: self.re * factor,
            im: self.im * factor,
        }
    }

    #[inline]
    pub fn square(&self) -> Self {
        Self {
            re: self.re * self.re - self.im * self.im,
            im: 2.0 * self.re * self.im,
        }
    }

    /// Magnitude squared (escape and glitch checks).
    #[inline]
    pub fn norm_sq(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// True magnitude (rebase check compares two magnitudes directly).
    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm_sq().sqrt()
    }
}

impl From<(f64, f64)> for StandardComplex {
    fn from((re, im): (f64, f64)) -> Self {
        Self { re, im }
    }
}

/// A reference orbit value in arbitrary precision. Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HighPrecisionPoint {
    re: BigFloat,
    im: BigFloat,
}

impl HighPrecisionPoint {
    pub fn new(re: BigFloat, im: BigFloat) -> Self {
        Self { re, im }
    }

    /// Parse both components from decimal strings at the given precision.
    pub fn from_strings(
        re: &str,
        im: &str,
        precision_bits: usize,
    ) -> Result<Self, PerturbationError> {
        Ok(Self {
            re: BigFloat::from_string(re, precision_bits)?,
            im: BigFloat::from_string(im, precision_bits)?,
        })
    }

    pub fn re(&self) -> &BigFloat {
        &self.re
    }

    pub fn im(&self) -> &BigFloat {
        &self.im
    }

    /// Narrow both coordinates to native floating point.
    pub fn to_standard(&self) -> StandardComplex {
        StandardComplex {
            re: self.re.to_f64(),
            im: self.im.to_f64(),
        }
    }
}
