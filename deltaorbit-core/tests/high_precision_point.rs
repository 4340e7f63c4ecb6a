use deltaorbit_core::{BigFloat, HighPrecisionPoint, ReferenceOrbit, StandardComplex};

// ============================================================================
// Narrowing to native precision
// ============================================================================

#[test]
fn narrowing_f64_path_is_exact() {
    let p = HighPrecisionPoint::new(
        BigFloat::with_precision(0.3, 64),
        BigFloat::with_precision(-0.1, 64),
    );
    assert_eq!(p.to_standard(), StandardComplex::new(0.3, -0.1));
}

#[test]
fn narrowing_arbitrary_path_rounds_to_nearest_f64() {
    // 0.1 is not representable; narrowing must land within one ulp of f64 0.1
    let p = HighPrecisionPoint::from_strings("0.1", "0.2", 512).unwrap();
    let s = p.to_standard();
    assert!((s.re - 0.1).abs() <= f64::EPSILON * 0.1);
    assert!((s.im - 0.2).abs() <= f64::EPSILON * 0.2);
}

#[test]
fn narrowing_beyond_f64_range_underflows_to_zero() {
    let p = HighPrecisionPoint::from_strings("1e-2000", "-1e-2000", 7000).unwrap();
    let s = p.to_standard();
    assert_eq!(s.re, 0.0);
    assert_eq!(s.im, 0.0);
}

#[test]
fn narrowing_keeps_sign() {
    let p = HighPrecisionPoint::from_strings("-1.75", "0.0", 256).unwrap();
    assert_eq!(p.to_standard().re, -1.75);
}

// ============================================================================
// Reference orbit construction
// ============================================================================

#[test]
fn orbit_preserves_point_order() {
    let points: Vec<HighPrecisionPoint> = ["0", "0.25", "0.3125"]
        .iter()
        .map(|re| HighPrecisionPoint::from_strings(re, "0", 128).unwrap())
        .collect();
    let orbit = ReferenceOrbit::new(points);

    let narrowed: Vec<f64> = orbit.points().iter().map(|p| p.to_standard().re).collect();
    assert_eq!(narrowed, vec![0.0, 0.25, 0.3125]);
}

#[test]
fn orbit_ids_are_unique_across_many_orbits() {
    let ids: std::collections::HashSet<_> = (0..100)
        .map(|_| ReferenceOrbit::new(Vec::new()).id())
        .collect();
    assert_eq!(ids.len(), 100);
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn high_precision_point_json_round_trip() {
    let original = HighPrecisionPoint::new(
        BigFloat::with_precision(1.5, 64),
        BigFloat::with_precision(-2.5, 128),
    );

    let json = serde_json::to_string(&original).unwrap();
    let restored: HighPrecisionPoint = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.to_standard(), original.to_standard());
    assert_eq!(restored.re().precision_bits(), 64);
    assert_eq!(restored.im().precision_bits(), 128);
}
