//! Path smoothing engine and its shared subroutines.

mod collision;
mod gradient;
mod grips;
mod round;

pub use collision::{update_angles, SegmentChecker};
pub use gradient::gradient_descent;
pub use grips::{Grips, SmoothingError, SmoothingReport};
pub use round::{RoundStats, RoundType};
