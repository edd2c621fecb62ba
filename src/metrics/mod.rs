//! Trajectory quality metrics.

mod clearance;
mod curvature;
mod length;

pub use clearance::{clearance_stats, clearing_distances};
pub use curvature::{curvature_stats, CurvatureStats, MIN_POINT_DISTANCE};
pub use length::{path_length, sample_length};
