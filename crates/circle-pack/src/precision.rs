//! Precision constants for circle comparisons.
//!
//! The placement predicates compare rounded distances against rounded
//! radius sums, so "touching" survives the float noise produced by the
//! tangent-circle construction. These values are calibrated together:
//! changing one without the others makes tangent circles flicker between
//! `Tangent` and `Intersecting`.

/// Inflation added to every enclosing circle radius, so circles touching
/// its boundary are still classified as inside.
/// Also the tolerance for "shares an x or y coordinate" when reordering
/// the Apollonius input triple.
/// Value: 1.0e-3
pub const THRESHOLD: f64 = 0.001;

/// Discriminant tolerance below which a quadratic is treated as having a
/// double root.
/// Value: 1.0e-6
pub const QUADRATIC_EPSILON: f64 = 0.000_001;

/// Decimal places kept when measuring the distance between two centers.
pub const DISTANCE_DECIMALS: i32 = 3;

/// Decimal places kept for radius sums and differences in the
/// intersection classifier.
pub const RADIUS_DECIMALS: i32 = 4;

/// Decimal places kept for the interpolation coefficient that positions
/// the circumscribed circle of two circles.
pub const TRANSLATION_DECIMALS: i32 = 6;

/// Round `value` to `decimals` places, ties to even.
///
/// Banker's rounding keeps `x.xxx5` boundaries from drifting upward
/// when many distances are accumulated against the same radius sum.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_requested_places() {
        assert_eq!(round_to(1.23456, 3), 1.235);
        assert_eq!(round_to(19.999_999_99, 3), 20.0);
        assert_eq!(round_to(-2.71828, 2), -2.72);
    }

    #[test]
    fn ties_go_to_even() {
        assert_eq!(round_to(0.5, 0), 0.0);
        assert_eq!(round_to(1.5, 0), 2.0);
        assert_eq!(round_to(2.5, 0), 2.0);
    }

    #[test]
    fn constants_are_ordered() {
        // The quadratic tolerance must stay well under the inflation.
        assert!(QUADRATIC_EPSILON < THRESHOLD);
        assert!(DISTANCE_DECIMALS < RADIUS_DECIMALS);
        assert!(RADIUS_DECIMALS < TRANSLATION_DECIMALS);
    }
}
