//! Curvature metrics over densely sampled trajectories.
//!
//! Curvature at a sample triple is the inverse radius of the circle through
//! the three points. Triples are taken with at least `MIN_POINT_DISTANCE`
//! between consecutive members so near-duplicate samples do not blow up the
//! estimate, and consecutive triples do not share samples.

use crate::core::Pose2D;

/// Minimum spacing between the samples of a curvature triple.
pub const MIN_POINT_DISTANCE: f64 = 0.3;

/// Curvature aggregates over one trajectory.
#[derive(Clone, Copy, Debug, Default)]
pub struct CurvatureStats {
    /// Sum over triples of curvature times the local segment length.
    pub normalized: f64,
    /// Largest (capped) triple curvature.
    pub max: f64,
}

/// Compute curvature aggregates over `samples`, capping each triple's
/// curvature at `max_curvature`.
pub fn curvature_stats(samples: &[Pose2D], max_curvature: f64) -> CurvatureStats {
    let mut stats = CurvatureStats::default();
    if samples.len() < 3 {
        return stats;
    }

    let mut i = 0;
    while i + 2 < samples.len() {
        let (x1, y1) = (samples[i].x, samples[i].y);

        // Advance to the next sample far enough from the previous one.
        let mut d12;
        loop {
            i += 1;
            if i >= samples.len() {
                return stats;
            }
            d12 = samples[i].distance_xy(x1, y1);
            if d12 >= MIN_POINT_DISTANCE {
                break;
            }
        }
        let (x2, y2) = (samples[i].x, samples[i].y);

        let mut d23;
        loop {
            i += 1;
            if i >= samples.len() {
                return stats;
            }
            d23 = samples[i].distance_xy(x2, y2);
            if d23 >= MIN_POINT_DISTANCE {
                break;
            }
        }
        let (x3, y3) = (samples[i].x, samples[i].y);
        i += 1;

        if (x1 == x2 && y1 == y2) || (x2 == x3 && y2 == y3) {
            continue;
        }
        if x1 == x3 && y1 == y3 {
            log::warn!("undefined curvature at reversal point ({x1}, {y1}), skipping triple");
            continue;
        }

        let ki = triple_curvature(x1, y1, x2, y2, x3, y3).min(max_curvature);
        stats.normalized += ki * (d12 + d23);
        if ki > stats.max {
            stats.max = ki;
        }
    }
    stats
}

/// Inverse circumradius of the triangle `(p1, p2, p3)`; zero for collinear
/// points.
fn triple_curvature(x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) -> f64 {
    let d = 2.0 * (x1 * (y2 - y3) + x2 * (y3 - y1) + x3 * (y1 - y2));
    if d.abs() < 1e-12 {
        return 0.0;
    }
    let s1 = x1 * x1 + y1 * y1;
    let s2 = x2 * x2 + y2 * y2;
    let s3 = x3 * x3 + y3 * y3;
    let cx = (s1 * (y2 - y3) + s2 * (y3 - y1) + s3 * (y1 - y2)) / d;
    let cy = (s1 * (x3 - x2) + s2 * (x1 - x3) + s3 * (x2 - x1)) / d;
    let radius = ((x1 - cx) * (x1 - cx) + (y1 - cy) * (y1 - cy)).sqrt();
    1.0 / radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn circle_samples(radius: f64, n: usize) -> Vec<Pose2D> {
        (0..n)
            .map(|i| {
                let a = i as f64 / n as f64 * std::f64::consts::PI;
                Pose2D::new(radius * a.cos(), radius * a.sin(), 0.0)
            })
            .collect()
    }

    #[test]
    fn test_straight_line_has_zero_curvature() {
        let samples: Vec<Pose2D> = (0..20)
            .map(|i| Pose2D::new(i as f64 * 0.5, 0.0, 0.0))
            .collect();
        let stats = curvature_stats(&samples, 1000.0);
        assert_relative_eq!(stats.normalized, 0.0, epsilon = 1e-12);
        assert_relative_eq!(stats.max, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_circle_arc_curvature() {
        let stats = curvature_stats(&circle_samples(5.0, 40), 1000.0);
        assert_relative_eq!(stats.max, 1.0 / 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_curvature_cap() {
        // Sharp kink, true curvature well above the cap.
        let samples = vec![
            Pose2D::new(0.0, 0.0, 0.0),
            Pose2D::new(0.4, 0.01, 0.0),
            Pose2D::new(0.0, 0.02, 0.0),
            Pose2D::new(0.4, 0.03, 0.0),
        ];
        let stats = curvature_stats(&samples, 2.0);
        assert!(stats.max <= 2.0);
    }

    #[test]
    fn test_short_input() {
        let samples = vec![Pose2D::new(0.0, 0.0, 0.0), Pose2D::new(1.0, 0.0, 0.0)];
        let stats = curvature_stats(&samples, 1000.0);
        assert_eq!(stats.normalized, 0.0);
    }
}
