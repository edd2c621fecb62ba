//! Angle and geometry utilities shared by the environment, the smoothing
//! engine and the metrics.
//!
//! All angles are in radians, counter-clockwise positive from the X axis.

use std::f64::consts::PI;

/// Two times PI (full circle in radians).
pub const TWO_PI: f64 = 2.0 * PI;

/// Normalize an angle to [-π, π].
///
/// Uses `atan2(sin, cos)` so the result is well defined for any finite
/// input, including values many turns away from the principal range.
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    angle.sin().atan2(angle.cos())
}

/// Heading of the segment from `(x1, y1)` to `(x2, y2)`, normalized.
#[inline]
pub fn slope(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    normalize_angle((y2 - y1).atan2(x2 - x1))
}

/// Average two headings, handling the wraparound at ±π.
///
/// When the two angles lie more than π apart, 2π is added to the smaller
/// one before averaging so the mean does not flip to the opposite
/// direction across the discontinuity.
#[inline]
pub fn average_angles(a: f64, b: f64) -> f64 {
    let mut l = a;
    let mut r = b;
    if (l - r).abs() >= PI {
        if l > r {
            r += TWO_PI;
        } else {
            l += TWO_PI;
        }
    }
    normalize_angle((l + r) * 0.5)
}
