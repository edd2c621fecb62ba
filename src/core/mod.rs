//! Core geometry and statistics primitives.

pub mod math;
pub mod pose;
pub mod stats;

pub use math::{average_angles, normalize_angle, slope, TWO_PI};
pub use pose::{Pose2D, DEFAULT_EQUALITY_EPS};
pub use stats::DistanceStats;
