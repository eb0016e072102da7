// Centralized tolerances and numeric constants for the scene geometry

pub const FLOATING_POINT_PRECISION: i32 = 3; // decimals kept on every Point
pub const EPS_DENOM: f64 = 1e-3;             // parallel / collinear guard in get_intersection
pub const EPS_LEN: f64 = 1e-9;               // zero-length vector threshold

// Reference point for ray-cast containment, -(2^53 - 1) in both axes
pub const FAR_AWAY: f64 = -9_007_199_254_740_991.0;

#[inline]
pub fn precision_scale() -> f64 { 10f64.powi(FLOATING_POINT_PRECISION) }

/// Round a coordinate to the stored precision; `-0.0` collapses to `0.0`.
#[inline]
pub fn round_coord(v: f64) -> f64 {
    let s = precision_scale();
    (v * s).round() / s + 0.0
}

#[inline] pub fn lerp(a: f64, b: f64, t: f64) -> f64 { a + (b - a) * t }

/// Deterministic pseudo-random value in [0, 1] derived from a seed value.
/// Same input always yields the same output; used for layout jitter.
#[inline]
pub fn kind_of_random(v: f64, modulus: f64) -> f64 {
    (v % modulus).cos().powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_keeps_three_decimals() {
        assert_eq!(round_coord(1.23456), 1.235);
        assert_eq!(round_coord(-0.0001), 0.0);
        assert!(round_coord(-0.0001).is_sign_positive());
    }

    #[test]
    fn kind_of_random_is_bounded() {
        for i in -50..50 {
            let v = kind_of_random(i as f64 * 13.7, 11.0);
            assert!((0.0..=1.0).contains(&v));
        }
    }
}
