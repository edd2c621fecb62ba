//! Per-round statistics of a smoothing run.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::DistanceStats;
use crate::env::Environment;
use crate::metrics;
use crate::path::Path;
use crate::steering::Steering;

/// Kind of smoothing round a statistics record belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundType {
    /// The unmodified input path, recorded before smoothing starts.
    Original,
    /// One gradient descent round, including node insertion.
    GradientDescent,
    /// One pruning round.
    Pruning,
}

/// Snapshot of path quality after one smoothing round.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundStats {
    pub round_type: RoundType,
    /// Node count after the round.
    pub nodes: usize,
    /// Steered trajectory length after the round.
    pub path_length: f64,
    /// Largest capped curvature along the trajectory.
    pub max_curvature: f64,
    /// Obstacle clearance at the path nodes.
    pub node_obstacle_distance: DistanceStats,
    /// Obstacle clearance along the steered trajectory.
    pub traj_obstacle_distance: DistanceStats,
    /// Wall time spent in the round.
    pub time: Duration,
}

impl RoundStats {
    /// Measure `path` after a round of the given type.
    pub fn capture(
        round_type: RoundType,
        path: &Path,
        env: &dyn Environment,
        steering: &dyn Steering,
        max_curvature_cap: f64,
        time: Duration,
    ) -> Self {
        let samples = path.interpolated(steering);
        let curvature = metrics::curvature_stats(&samples, max_curvature_cap);
        Self {
            round_type,
            nodes: path.len(),
            path_length: metrics::sample_length(&samples),
            max_curvature: curvature.max,
            node_obstacle_distance: metrics::clearance_stats(&path.poses, env),
            traj_obstacle_distance: metrics::clearance_stats(&samples, env),
            time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Pose2D;
    use crate::env::GridEnvironment;
    use crate::steering::LinearSteering;
    use approx::assert_relative_eq;

    #[test]
    fn test_capture_measures_path() {
        let mut grid = GridEnvironment::new(8, 8);
        grid.fill(4, 4);
        let steering = LinearSteering::default();
        let path = Path::new(vec![
            Pose2D::new(1.0, 1.0, 0.0),
            Pose2D::new(1.0, 6.0, 0.0),
        ]);
        let stats = RoundStats::capture(
            RoundType::Original,
            &path,
            &grid,
            &steering,
            1000.0,
            Duration::from_millis(1),
        );
        assert_eq!(stats.round_type, RoundType::Original);
        assert_eq!(stats.nodes, 2);
        assert_relative_eq!(stats.path_length, 5.0, epsilon = 1e-9);
        assert_relative_eq!(stats.max_curvature, 0.0, epsilon = 1e-12);
        assert!(stats.node_obstacle_distance.min > 0.0);
    }
}
