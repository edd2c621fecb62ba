//! Obstacle clearance along a trajectory.

use crate::core::{DistanceStats, Pose2D};
use crate::env::Environment;

/// Clearance at each sample position.
pub fn clearing_distances(samples: &[Pose2D], env: &dyn Environment) -> Vec<f64> {
    samples
        .iter()
        .map(|p| env.bilinear_distance(p.x, p.y))
        .collect()
}

/// Aggregate clearance statistics over the samples.
pub fn clearance_stats(samples: &[Pose2D], env: &dyn Environment) -> DistanceStats {
    DistanceStats::from_samples(&clearing_distances(samples, env))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::GridEnvironment;
    use approx::assert_relative_eq;

    #[test]
    fn test_clearance_along_row() {
        let mut grid = GridEnvironment::new(6, 6);
        grid.fill(3, 0);
        let samples = vec![
            Pose2D::new(3.0, 2.0, 0.0),
            Pose2D::new(3.0, 4.0, 0.0),
        ];
        let distances = clearing_distances(&samples, &grid);
        assert_eq!(distances.len(), 2);
        assert_relative_eq!(distances[0], 2.0, epsilon = 1e-9);
        assert_relative_eq!(distances[1], 4.0, epsilon = 1e-9);

        let stats = clearance_stats(&samples, &grid);
        assert_relative_eq!(stats.mean, 3.0, epsilon = 1e-9);
        assert_relative_eq!(stats.min, 2.0, epsilon = 1e-9);
    }
}
