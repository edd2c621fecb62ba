//! Pose sequences produced by planners and reshaped by the smoother.

use serde::{Deserialize, Serialize};

use crate::core::{Pose2D, DEFAULT_EQUALITY_EPS};
use crate::steering::Steering;

/// An ordered sequence of poses.
///
/// The first and last poses are anchors: smoothing never moves their
/// positions, and adjusts their headings only when doing so keeps the
/// adjacent segments collision free.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Path {
    /// Path nodes in travel order.
    pub poses: Vec<Pose2D>,
}

impl Path {
    /// Wrap a pose sequence.
    pub fn new(poses: Vec<Pose2D>) -> Self {
        Self { poses }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// Whether the path has no nodes.
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Sum of node-to-node Euclidean distances.
    pub fn node_length(&self) -> f64 {
        self.poses
            .windows(2)
            .map(|pair| pair[0].distance(&pair[1]))
            .sum()
    }

    /// Densely sampled form of the path: every segment steered, joint
    /// duplicates dropped.
    pub fn interpolated(&self, steering: &dyn Steering) -> Vec<Pose2D> {
        let mut samples: Vec<Pose2D> = Vec::new();
        for pair in self.poses.windows(2) {
            let steered = steering.steer(&pair[0], &pair[1]);
            let skip = usize::from(!samples.is_empty());
            samples.extend(steered.poses.into_iter().skip(skip));
        }
        if samples.is_empty() {
            samples = self.poses.clone();
        }
        samples
    }

    /// Resample the path at `count` positions spaced equally by arc length
    /// along the node polyline. Headings are carried from the segment each
    /// sample falls on. Returns the path unchanged when it has fewer than
    /// two nodes or `count < 2`.
    pub fn resample_equidistant(&self, count: usize) -> Path {
        if self.poses.len() < 2 || count < 2 {
            return self.clone();
        }
        let total = self.node_length();
        if total < f64::EPSILON {
            return Path::new(vec![self.poses[0]; count]);
        }
        let spacing = total / (count - 1) as f64;

        let mut samples = Vec::with_capacity(count);
        samples.push(self.poses[0]);
        let mut segment = 0;
        let mut segment_start = 0.0;
        let mut segment_len = self.poses[0].distance(&self.poses[1]);
        for i in 1..count - 1 {
            let target = spacing * i as f64;
            while segment_start + segment_len < target && segment + 2 < self.poses.len() {
                segment_start += segment_len;
                segment += 1;
                segment_len = self.poses[segment].distance(&self.poses[segment + 1]);
            }
            let a = &self.poses[segment];
            let b = &self.poses[segment + 1];
            let t = if segment_len < f64::EPSILON {
                0.0
            } else {
                ((target - segment_start) / segment_len).clamp(0.0, 1.0)
            };
            samples.push(Pose2D::new(
                a.x + (b.x - a.x) * t,
                a.y + (b.y - a.y) * t,
                a.slope_to(b),
            ));
        }
        samples.push(*self.poses.last().unwrap());
        Path::new(samples)
    }

    /// Drop adjacent nodes that are equal within the default tolerance.
    pub fn dedup_adjacent(&mut self) {
        self.poses
            .dedup_by(|a, b| a.approx_eq(b, DEFAULT_EQUALITY_EPS));
    }
}

impl From<Vec<Pose2D>> for Path {
    fn from(poses: Vec<Pose2D>) -> Self {
        Self::new(poses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steering::LinearSteering;
    use approx::assert_relative_eq;

    fn l_path() -> Path {
        Path::new(vec![
            Pose2D::new(0.0, 0.0, 0.0),
            Pose2D::new(4.0, 0.0, 0.0),
            Pose2D::new(4.0, 3.0, std::f64::consts::FRAC_PI_2),
        ])
    }

    #[test]
    fn test_node_length() {
        assert_relative_eq!(l_path().node_length(), 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_interpolated_joins_segments() {
        let steering = LinearSteering { step: 1.0 };
        let samples = l_path().interpolated(&steering);
        // 5 samples on the first segment, 4 on the second, joint shared.
        assert_eq!(samples.len(), 8);
        assert_relative_eq!(samples[4].x, 4.0, epsilon = 1e-12);
        assert_relative_eq!(samples[4].y, 0.0, epsilon = 1e-12);
        for pair in samples.windows(2) {
            assert!(pair[0].distance(&pair[1]) <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn test_resample_equidistant() {
        let resampled = l_path().resample_equidistant(8);
        assert_eq!(resampled.len(), 8);
        assert_relative_eq!(resampled.poses[0].x, 0.0, epsilon = 1e-12);
        let last = resampled.poses.last().unwrap();
        assert_relative_eq!(last.x, 4.0, epsilon = 1e-12);
        assert_relative_eq!(last.y, 3.0, epsilon = 1e-12);
        for pair in resampled.poses.windows(2) {
            assert_relative_eq!(pair[0].distance(&pair[1]), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_dedup_adjacent() {
        let mut path = Path::new(vec![
            Pose2D::new(0.0, 0.0, 0.0),
            Pose2D::new(0.0, 0.0, 0.0),
            Pose2D::new(1.0, 0.0, 0.0),
        ]);
        path.dedup_adjacent();
        assert_eq!(path.len(), 2);
    }
}
