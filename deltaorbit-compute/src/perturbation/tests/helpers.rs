use deltaorbit_core::{BigFloat, HighPrecisionPoint, ReferenceOrbit, StandardComplex};

/// Standard tau_sq threshold for tests (τ = 10⁻³)
pub const TEST_TAU_SQ: f64 = 1e-6;

/// Reference orbit X_0 … X_k at c_ref, computed in BigFloat.
///
/// Stops after the first point with |X|² > 4 (that point is kept), or after
/// `max_points` points if the reference stays bounded.
pub fn compute_reference_orbit(c_ref: &(BigFloat, BigFloat), max_points: usize) -> ReferenceOrbit {
    let precision = c_ref.0.precision_bits();
    let mut x = BigFloat::zero(precision);
    let mut y = BigFloat::zero(precision);
    let four = BigFloat::with_precision(4.0, precision);
    let two = BigFloat::with_precision(2.0, precision);

    let mut points = Vec::with_capacity(max_points);
    while points.len() < max_points {
        points.push(HighPrecisionPoint::new(x.clone(), y.clone()));

        let x_sq = x.mul(&x);
        let y_sq = y.mul(&y);
        if x_sq.add(&y_sq).gt(&four) {
            break;
        }

        // z = z^2 + c
        let new_x = x_sq.sub(&y_sq).add(&c_ref.0);
        let new_y = two.mul(&x).mul(&y).add(&c_ref.1);
        x = new_x;
        y = new_y;
    }

    ReferenceOrbit::new(points)
}

pub fn reference_at(re: f64, im: f64, max_points: usize) -> ReferenceOrbit {
    compute_reference_orbit(
        &(
            BigFloat::with_precision(re, 128),
            BigFloat::with_precision(im, 128),
        ),
        max_points,
    )
}

/// Orbit whose every point is `value`.
pub fn constant_orbit(value: (f64, f64), len: usize) -> ReferenceOrbit {
    (0..len)
        .map(|_| {
            HighPrecisionPoint::new(
                BigFloat::with_precision(value.0, 128),
                BigFloat::with_precision(value.1, 128),
            )
        })
        .collect()
}

/// Orbit built from explicit f64 points.
pub fn orbit_from(points: &[(f64, f64)]) -> ReferenceOrbit {
    points
        .iter()
        .map(|&(re, im)| {
            HighPrecisionPoint::new(
                BigFloat::with_precision(re, 128),
                BigFloat::with_precision(im, 128),
            )
        })
        .collect()
}

/// Direct f64 escape iteration with the same bailout (|z|² > 4).
pub fn compute_direct(c: StandardComplex, max_iter: u32) -> Option<u32> {
    let mut z = StandardComplex::ZERO;
    for n in 1..=max_iter {
        z = z.square().add(&c);
        if z.norm_sq() > 4.0 {
            return Some(n);
        }
    }
    None
}

/// First index n with |X_n|² > 4 in the narrowed reference, if any.
pub fn reference_escape_index(orbit: &ReferenceOrbit) -> Option<u32> {
    orbit
        .points()
        .iter()
        .position(|p| p.to_standard().norm_sq() > 4.0)
        .map(|n| n as u32)
}

/// Direct BigFloat escape iteration at c, for offsets below f64 resolution.
pub fn compute_direct_bigfloat(c: &(BigFloat, BigFloat), max_iter: u32) -> Option<u32> {
    let precision = c.0.precision_bits();
    let mut x = BigFloat::zero(precision);
    let mut y = BigFloat::zero(precision);
    let four = BigFloat::with_precision(4.0, precision);
    let two = BigFloat::with_precision(2.0, precision);

    for n in 1..=max_iter {
        let new_x = x.mul(&x).sub(&y.mul(&y)).add(&c.0);
        let new_y = two.mul(&x).mul(&y).add(&c.1);
        x = new_x;
        y = new_y;
        if x.mul(&x).add(&y.mul(&y)).gt(&four) {
            return Some(n);
        }
    }
    None
}
