//! Steering functions connecting pairs of poses.

use serde::{Deserialize, Serialize};

use crate::core::Pose2D;

/// A steered connection between two poses.
#[derive(Clone, Debug)]
pub struct SteeredPath {
    /// Sampled poses along the connection, endpoints included.
    pub poses: Vec<Pose2D>,
    /// Arc length of the connection in world units.
    pub length: f64,
}

/// Produces the motion a robot would take between two poses.
///
/// Implementations must be deterministic: the same pose pair always yields
/// the same samples and length.
pub trait Steering {
    /// Steer from `from` to `to`.
    fn steer(&self, from: &Pose2D, to: &Pose2D) -> SteeredPath;
}

/// Straight-line steering sampled at a fixed step.
///
/// Intermediate samples carry the segment heading; the endpoints keep their
/// own headings. A zero-length segment yields the single start pose.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LinearSteering {
    /// Sample spacing in world units.
    #[serde(default = "default_step")]
    pub step: f64,
}

fn default_step() -> f64 {
    0.1
}

impl Default for LinearSteering {
    fn default() -> Self {
        Self { step: 0.1 }
    }
}

impl Steering for LinearSteering {
    fn steer(&self, from: &Pose2D, to: &Pose2D) -> SteeredPath {
        let length = from.distance(to);
        if length < f64::EPSILON {
            return SteeredPath {
                poses: vec![*from],
                length: 0.0,
            };
        }
        let heading = from.slope_to(to);
        let steps = (length / self.step).ceil() as usize;
        let mut poses = Vec::with_capacity(steps + 1);
        poses.push(*from);
        for i in 1..steps {
            let t = i as f64 / steps as f64;
            poses.push(Pose2D::new(
                from.x + (to.x - from.x) * t,
                from.y + (to.y - from.y) * t,
                heading,
            ));
        }
        poses.push(*to);
        SteeredPath { poses, length }
    }
}
