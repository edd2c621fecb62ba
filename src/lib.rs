//! # GRIPS: Gradient-Informed Path Smoothing
//!
//! Post-smoothing for 2D robot motion plans. Takes the jagged pose sequence
//! a planner produced and reshapes it against the environment's obstacle
//! distance field: gradient descent pushes nodes away from obstacles, extra
//! nodes appear at clearance minima, and a pruning stage removes every node
//! a shorter collision-free connection can skip.
//!
//! ## Quick Start
//!
//! ```rust
//! use grips::{GridEnvironment, GripsConfig, Grips, LinearSteering, Path, Pose2D};
//!
//! // 10x10 grid with a 2x2 obstacle block in the middle.
//! let mut grid = GridEnvironment::new(10, 10);
//! grid.fill_rect(4, 4, 5, 5);
//!
//! let steering = LinearSteering::default();
//! let grips = Grips::new(&grid, &steering, GripsConfig::default());
//!
//! let mut path = Path::new(vec![
//!     Pose2D::new(0.5, 0.5, 0.0),
//!     Pose2D::new(9.5, 9.5, 0.0),
//! ]);
//! let report = grips.smooth(&mut path);
//! assert!(report.success());
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: poses, angle math and distance statistics
//! - [`config`]: configuration types
//! - [`env`]: environments, occupancy grid and obstacle distance field
//! - [`steering`]: steering functions connecting pose pairs
//! - [`path`]: pose sequences and resampling helpers
//! - [`smoothing`]: the smoothing engine
//! - [`metrics`]: trajectory quality metrics

pub mod config;
pub mod core;
pub mod env;
pub mod metrics;
pub mod path;
pub mod smoothing;
pub mod steering;

pub use config::{DistanceFieldConfig, DistanceFieldMethod, GridConfig, GripsConfig};
pub use self::core::{DistanceStats, Pose2D};
pub use env::{Environment, GridEnvironment};
pub use path::Path;
pub use smoothing::{Grips, SmoothingError, SmoothingReport};
pub use steering::{LinearSteering, SteeredPath, Steering};
