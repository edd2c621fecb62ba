//! Oriented 2D pose, the node type of planner paths.

use serde::{Deserialize, Serialize};

use super::math::slope;

/// Default tolerance for pose equality checks.
pub const DEFAULT_EQUALITY_EPS: f64 = 1e-4;

/// A 2D pose: position in world units plus heading.
///
/// Poses have no identity beyond their coordinates; equality is
/// tolerance-based via [`Pose2D::approx_eq`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose2D {
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
    /// Heading angle in radians, CCW positive from the X axis.
    pub theta: f64,
}

impl Pose2D {
    /// Create a new pose.
    #[inline]
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self { x, y, theta }
    }

    /// Euclidean distance to another pose's position.
    #[inline]
    pub fn distance(&self, other: &Pose2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Euclidean distance to a point.
    #[inline]
    pub fn distance_xy(&self, x: f64, y: f64) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Heading of the segment from this pose to `other`.
    #[inline]
    pub fn slope_to(&self, other: &Pose2D) -> f64 {
        slope(self.x, self.y, other.x, other.y)
    }

    /// Component-wise equality within `eps` on x, y and theta.
    #[inline]
    pub fn approx_eq(&self, other: &Pose2D, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
            && (self.theta - other.theta).abs() <= eps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn test_distance() {
        let a = Pose2D::new(0.0, 0.0, 0.0);
        let b = Pose2D::new(3.0, 4.0, 1.0);
        assert_relative_eq!(a.distance(&b), 5.0, epsilon = 1e-12);
        assert_relative_eq!(a.distance_xy(3.0, 4.0), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_slope_to() {
        let a = Pose2D::new(0.0, 0.0, 0.0);
        let b = Pose2D::new(2.0, 2.0, 0.0);
        assert_relative_eq!(a.slope_to(&b), FRAC_PI_4, epsilon = 1e-12);
    }

    #[test]
    fn test_approx_eq() {
        let a = Pose2D::new(1.0, 2.0, 0.5);
        let b = Pose2D::new(1.0 + 5e-5, 2.0 - 5e-5, 0.5 + 5e-5);
        assert!(a.approx_eq(&b, DEFAULT_EQUALITY_EPS));
        assert!(!a.approx_eq(&b, 1e-6));
    }
}
