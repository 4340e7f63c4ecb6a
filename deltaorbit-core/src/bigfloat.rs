use dashu_base::Approximation;
use dashu_float::{DBig, FBig};
use serde::{Deserialize, Serialize};

use crate::PerturbationError;

/// Arbitrary precision floating point with explicit precision enforcement
///
/// Uses f64 internally when precision_bits <= 64, FBig otherwise.
/// Reference orbit points are stored in this type; the delta iterator only
/// ever sees them after narrowing through `to_f64`.
#[derive(Clone, Debug)]
pub struct BigFloat {
    value: BigFloatValue,
    precision_bits: usize,
}

#[derive(Clone, Debug)]
enum BigFloatValue {
    F64(f64),
    Arbitrary(FBig),
}

impl BigFloat {
    /// Create BigFloat from f64 with explicit precision
    ///
    /// # Panics
    /// Panics if `val` is not finite and `precision_bits > 64`.
    pub fn with_precision(val: f64, precision_bits: usize) -> Self {
        let value = if precision_bits <= 64 {
            BigFloatValue::F64(val)
        } else {
            BigFloatValue::Arbitrary(fbig_from_f64(val, precision_bits))
        };

        Self {
            value,
            precision_bits,
        }
    }

    /// Create zero with explicit precision
    pub fn zero(precision_bits: usize) -> Self {
        Self::with_precision(0.0, precision_bits)
    }

    /// Get precision in bits
    pub fn precision_bits(&self) -> usize {
        self.precision_bits
    }

    /// Narrow to f64. Magnitudes below f64 range flush to zero.
    pub fn to_f64(&self) -> f64 {
        match &self.value {
            BigFloatValue::F64(v) => *v,
            BigFloatValue::Arbitrary(v) => v.to_f64().value(),
        }
    }

    /// Create BigFloat from a decimal string with explicit precision
    ///
    /// Allows values beyond f64 range (e.g. "1e-1000").
    pub fn from_string(val: &str, precision_bits: usize) -> Result<Self, PerturbationError> {
        if precision_bits <= 64 {
            return val
                .parse::<f64>()
                .map(|f| Self::with_precision(f, precision_bits))
                .map_err(|e| PerturbationError::Parse(format!("{val:?} as f64: {e}")));
        }

        let dbig = val
            .parse::<DBig>()
            .map_err(|e| PerturbationError::Parse(format!("{val:?} as DBig: {e}")))?;
        // Single base conversion at the target precision avoids double rounding
        let fbig_halfaway = match dbig.with_base_and_precision::<2>(precision_bits) {
            Approximation::Exact(v) => v,
            Approximation::Inexact(v, _) => v,
        };
        let fbig = fbig_halfaway.with_rounding::<dashu_float::round::mode::Zero>();

        Ok(Self {
            value: BigFloatValue::Arbitrary(fbig),
            precision_bits,
        })
    }

    /// Add two BigFloats, preserving max precision
    pub fn add(&self, other: &Self) -> Self {
        self.binary_op(other, |a, b| a + b, |a, b| a + b)
    }

    /// Subtract two BigFloats, preserving max precision
    pub fn sub(&self, other: &Self) -> Self {
        self.binary_op(other, |a, b| a - b, |a, b| a - b)
    }

    /// Multiply two BigFloats, preserving max precision
    pub fn mul(&self, other: &Self) -> Self {
        self.binary_op(other, |a, b| a * b, |a, b| a * b)
    }

    pub fn gt(&self, other: &Self) -> bool {
        self > other
    }

    fn binary_op(
        &self,
        other: &Self,
        f64_op: impl Fn(f64, f64) -> f64,
        fbig_op: impl Fn(&FBig, &FBig) -> FBig,
    ) -> Self {
        let result_precision = self.precision_bits.max(other.precision_bits);

        let value = match (&self.value, &other.value) {
            (BigFloatValue::F64(a), BigFloatValue::F64(b)) if result_precision <= 64 => {
                BigFloatValue::F64(f64_op(*a, *b))
            }
            _ => BigFloatValue::Arbitrary(fbig_op(&self.to_fbig(), &other.to_fbig())),
        };

        Self {
            value,
            precision_bits: result_precision,
        }
    }

    fn to_fbig(&self) -> FBig {
        match &self.value {
            BigFloatValue::F64(v) => fbig_from_f64(*v, self.precision_bits.max(64)),
            BigFloatValue::Arbitrary(v) => v.clone(),
        }
    }
}

fn fbig_from_f64(val: f64, precision_bits: usize) -> FBig {
    if val == 0.0 {
        return FBig::ZERO.with_precision(precision_bits).value();
    }
    FBig::try_from(val)
        .expect("BigFloat requires a finite f64")
        .with_precision(precision_bits)
        .value()
}

impl PartialEq for BigFloat {
    fn eq(&self, other: &Self) -> bool {
        match (&self.value, &other.value) {
            (BigFloatValue::F64(a), BigFloatValue::F64(b)) => a == b,
            _ => self.to_fbig() == other.to_fbig(),
        }
    }
}

impl PartialOrd for BigFloat {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (&self.value, &other.value) {
            (BigFloatValue::F64(a), BigFloatValue::F64(b)) => a.partial_cmp(b),
            _ => self.to_fbig().partial_cmp(&other.to_fbig()),
        }
    }
}

impl std::fmt::Display for BigFloat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            BigFloatValue::F64(v) => write!(f, "{}", v),
            BigFloatValue::Arbitrary(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct BigFloatSerde {
    value: String,
    precision_bits: usize,
}

impl Serialize for BigFloat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        BigFloatSerde {
            value: self.to_string(),
            precision_bits: self.precision_bits,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BigFloat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let serde = BigFloatSerde::deserialize(deserializer)?;

        let value = if serde.precision_bits <= 64 {
            let f = serde
                .value
                .parse::<f64>()
                .map_err(|e| serde::de::Error::custom(format!("Failed to parse f64: {}", e)))?;
            BigFloatValue::F64(f)
        } else {
            let fbig = serde
                .value
                .parse::<FBig>()
                .map_err(|e| serde::de::Error::custom(format!("Failed to parse FBig: {}", e)))?;
            BigFloatValue::Arbitrary(fbig)
        };

        Ok(BigFloat {
            value,
            precision_bits: serde.precision_bits,
        })
    }
}
