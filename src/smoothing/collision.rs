//! Segment collision checks and heading maintenance.

use crate::core::{average_angles, Pose2D};
use crate::env::Environment;
use crate::steering::{SteeredPath, Steering};

/// Collision oracle for steered segments.
///
/// Bundles the environment and the steering function so segment queries
/// sample the actual motion between two poses rather than a straight line
/// assumption.
pub struct SegmentChecker<'a> {
    env: &'a dyn Environment,
    steering: &'a dyn Steering,
}

impl<'a> SegmentChecker<'a> {
    pub fn new(env: &'a dyn Environment, steering: &'a dyn Steering) -> Self {
        Self { env, steering }
    }

    /// The underlying environment.
    pub fn env(&self) -> &dyn Environment {
        self.env
    }

    /// Steer between two poses.
    pub fn steer(&self, from: &Pose2D, to: &Pose2D) -> SteeredPath {
        self.steering.steer(from, to)
    }

    /// Whether any steered sample between `from` and `to` collides.
    pub fn segment_collides(&self, from: &Pose2D, to: &Pose2D) -> bool {
        self.steering
            .steer(from, to)
            .poses
            .iter()
            .any(|p| self.env.collides_pose(p))
    }

    /// Steer between two poses, or `None` when the segment collides.
    pub fn steer_free(&self, from: &Pose2D, to: &Pose2D) -> Option<SteeredPath> {
        let steered = self.steering.steer(from, to);
        if steered.poses.iter().any(|p| self.env.collides_pose(p)) {
            None
        } else {
            Some(steered)
        }
    }
}

/// Recompute node headings from the path geometry.
///
/// The first node takes the heading of its outgoing segment, the last node
/// that of its incoming segment. Interior nodes take either the incoming
/// segment heading or, with `average`, the wraparound-aware mean of the
/// incoming and outgoing headings. With `prevent_collisions`, a heading
/// change is rolled back when it makes an adjacent segment collide.
pub fn update_angles(
    poses: &mut [Pose2D],
    checker: &SegmentChecker<'_>,
    average: bool,
    prevent_collisions: bool,
) {
    let n = poses.len();
    if n < 2 {
        return;
    }

    let old = poses[0].theta;
    poses[0].theta = poses[0].slope_to(&poses[1]);
    if prevent_collisions && checker.segment_collides(&poses[0], &poses[1]) {
        poses[0].theta = old;
    }

    for i in 1..n - 1 {
        let incoming = poses[i - 1].slope_to(&poses[i]);
        let theta = if average {
            average_angles(incoming, poses[i].slope_to(&poses[i + 1]))
        } else {
            incoming
        };
        let old = poses[i].theta;
        poses[i].theta = theta;
        if prevent_collisions
            && (checker.segment_collides(&poses[i - 1], &poses[i])
                || checker.segment_collides(&poses[i], &poses[i + 1]))
        {
            poses[i].theta = old;
        }
    }

    let old = poses[n - 1].theta;
    poses[n - 1].theta = poses[n - 2].slope_to(&poses[n - 1]);
    if prevent_collisions && checker.segment_collides(&poses[n - 2], &poses[n - 1]) {
        poses[n - 1].theta = old;
    }
}
