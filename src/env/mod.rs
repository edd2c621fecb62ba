//! Workspace environments: collision queries and obstacle clearance.

mod distance_field;
mod grid;

pub use grid::GridEnvironment;

use crate::core::Pose2D;

/// A 2D workspace the smoother can query for collisions and clearance.
///
/// Coordinates are in world units with the origin at the lower-left corner
/// of the workspace; the valid region is `[0, max_x] × [0, max_y]`.
pub trait Environment {
    /// Upper X bound of the workspace.
    fn max_x(&self) -> f64;

    /// Upper Y bound of the workspace.
    fn max_y(&self) -> f64;

    /// Whether `(x, y)` lies inside the workspace bounds.
    fn in_bounds(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && x <= self.max_x() && y >= 0.0 && y <= self.max_y()
    }

    /// Whether the robot collides at `(x, y)`. Out-of-bounds points always
    /// collide.
    fn collides(&self, x: f64, y: f64) -> bool;

    /// Whether the robot collides at a pose's position.
    fn collides_pose(&self, pose: &Pose2D) -> bool {
        self.collides(pose.x, pose.y)
    }

    /// Distance from `(x, y)` to the nearest obstacle, bilinearly
    /// interpolated between clearance samples. Points outside the bounds
    /// are clamped onto them first.
    fn bilinear_distance(&self, x: f64, y: f64) -> f64;

    /// Central-difference gradient of the clearance at `(x, y)` with step
    /// `p`, or `None` when the point is out of bounds.
    fn distance_gradient(&self, x: f64, y: f64, p: f64) -> Option<(f64, f64)> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let dx = (self.bilinear_distance(x + p, y) - self.bilinear_distance(x - p, y)) / (2.0 * p);
        let dy = (self.bilinear_distance(x, y + p) - self.bilinear_distance(x, y - p)) / (2.0 * p);
        Some((dx, dy))
    }
}
