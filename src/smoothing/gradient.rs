//! Gradient descent on the obstacle distance field.

use crate::core::Pose2D;
use crate::env::Environment;

/// Lower bound on the clearance used to scale the descent step, so nodes
/// at or inside obstacles still move a bounded amount.
const MIN_STEP_DISTANCE: f64 = 0.1;

/// Move every interior node one step driven by the clearance gradient.
/// The x step runs against the gradient and the y step with it, so a node
/// heading straight at an obstacle swings sideways around it instead of
/// backing up along its own segment. The first and last nodes are anchors
/// and never move; nodes outside the workspace bounds are left in place.
pub fn gradient_descent(
    poses: &mut [Pose2D],
    env: &dyn Environment,
    eta: f64,
    gradient_step: f64,
) {
    if poses.len() < 3 {
        return;
    }
    let end = poses.len() - 1;
    for pose in &mut poses[1..end] {
        if let Some((dx, dy)) = env.distance_gradient(pose.x, pose.y, gradient_step) {
            let distance = env.bilinear_distance(pose.x, pose.y).max(MIN_STEP_DISTANCE);
            pose.x -= eta * dx / distance;
            pose.y += eta * dy / distance;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::GridEnvironment;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_grid_leaves_nodes_in_place() {
        let grid = GridEnvironment::new(8, 8);
        let mut poses = vec![
            Pose2D::new(1.0, 1.0, 0.0),
            Pose2D::new(3.7, 4.2, 0.0),
            Pose2D::new(7.0, 7.0, 0.0),
        ];
        let before = poses.clone();
        gradient_descent(&mut poses, &grid, 0.9, 0.1);
        for (a, b) in poses.iter().zip(before.iter()) {
            assert_relative_eq!(a.x, b.x, epsilon = 1e-12);
            assert_relative_eq!(a.y, b.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_node_below_obstacle_is_pushed_down() {
        let mut grid = GridEnvironment::new(10, 10);
        grid.fill_rect(4, 4, 5, 5);
        let mut poses = vec![
            Pose2D::new(1.0, 2.0, 0.0),
            Pose2D::new(4.5, 3.0, 0.0),
            Pose2D::new(8.0, 2.0, 0.0),
        ];
        let clearance_before = grid.bilinear_distance(poses[1].x, poses[1].y);
        gradient_descent(&mut poses, &grid, 0.9, 0.1);
        let clearance_after = grid.bilinear_distance(poses[1].x, poses[1].y);
        assert!(poses[1].y < 3.0, "node was not pushed away from the block");
        assert!(clearance_after > clearance_before);
    }

    #[test]
    fn test_anchors_never_move() {
        let mut grid = GridEnvironment::new(10, 10);
        grid.fill_rect(4, 4, 5, 5);
        let mut poses = vec![
            Pose2D::new(4.5, 3.0, 0.0),
            Pose2D::new(4.5, 4.5, 0.0),
            Pose2D::new(4.5, 7.0, 0.0),
        ];
        gradient_descent(&mut poses, &grid, 0.9, 0.1);
        assert_relative_eq!(poses[0].x, 4.5, epsilon = 1e-12);
        assert_relative_eq!(poses[0].y, 3.0, epsilon = 1e-12);
        assert_relative_eq!(poses[2].x, 4.5, epsilon = 1e-12);
        assert_relative_eq!(poses[2].y, 7.0, epsilon = 1e-12);
    }
}
