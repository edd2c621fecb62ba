//! Path length over the steered trajectory.

use crate::core::Pose2D;
use crate::path::Path;
use crate::steering::Steering;

/// Sum of consecutive sample distances.
pub fn sample_length(samples: &[Pose2D]) -> f64 {
    samples
        .windows(2)
        .map(|pair| pair[0].distance(&pair[1]))
        .sum()
}

/// Length of the steered trajectory through the path nodes.
pub fn path_length(path: &Path, steering: &dyn Steering) -> f64 {
    sample_length(&path.interpolated(steering))
}
