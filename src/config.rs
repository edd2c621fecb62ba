//! Configuration structs for the environment and the smoothing engine.
//!
//! Every tunable lives on an explicit config struct passed to the component
//! that uses it. All structs deserialize from partial documents, missing
//! fields fall back to the defaults below.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Algorithm used to build the obstacle distance field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DistanceFieldMethod {
    /// Pick based on grid size: exact brute force below
    /// `fast_odf_threshold` cells, dead reckoning above.
    #[default]
    Auto,
    /// Exact O(cells²) nearest-obstacle scan.
    BruteForce,
    /// Dead reckoning transform (Grevera), two-pass propagation.
    DeadReckoning,
}

/// Distance field construction settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DistanceFieldConfig {
    /// Construction algorithm.
    #[serde(default)]
    pub method: DistanceFieldMethod,

    /// Cell count at which `Auto` switches from brute force to dead
    /// reckoning.
    #[serde(default = "defaults::fast_odf_threshold")]
    pub fast_odf_threshold: usize,
}

impl Default for DistanceFieldConfig {
    fn default() -> Self {
        Self {
            method: DistanceFieldMethod::Auto,
            fast_odf_threshold: 10_000,
        }
    }
}

/// Grid environment settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GridConfig {
    /// Side length of a grid cell in world units.
    #[serde(default = "defaults::cell_size")]
    pub cell_size: f64,

    /// Half-extent of the square robot footprint used by point collision
    /// checks, in world units.
    #[serde(default = "defaults::footprint_radius")]
    pub footprint_radius: f64,

    /// Distance field construction.
    #[serde(default)]
    pub distance_field: DistanceFieldConfig,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            footprint_radius: 0.15,
            distance_field: DistanceFieldConfig::default(),
        }
    }
}

/// Smoothing engine settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GripsConfig {
    /// Number of gradient descent rounds.
    #[serde(default = "defaults::gradient_descent_rounds")]
    pub gradient_descent_rounds: usize,

    /// Initial gradient descent step size.
    #[serde(default = "defaults::eta")]
    pub eta: f64,

    /// Multiplicative step size decay applied after each round.
    #[serde(default = "defaults::eta_discount")]
    pub eta_discount: f64,

    /// Minimum spacing between an inserted node and its neighbors.
    #[serde(default = "defaults::min_node_distance")]
    pub min_node_distance: f64,

    /// Pruning round limit; exceeding it fails the smoothing.
    #[serde(default = "defaults::max_pruning_rounds")]
    pub max_pruning_rounds: usize,

    /// Central difference step for the distance gradient.
    #[serde(default = "defaults::gradient_step")]
    pub gradient_step: f64,

    /// Record per-round statistics in the report.
    #[serde(default)]
    pub track_round_stats: bool,

    /// Curvature cap used by the round statistics.
    #[serde(default = "defaults::max_curvature")]
    pub max_curvature: f64,

    /// Abort when a round starts after this much elapsed time.
    #[serde(skip)]
    pub deadline: Option<Duration>,
}

impl Default for GripsConfig {
    fn default() -> Self {
        Self {
            gradient_descent_rounds: 5,
            eta: 0.9,
            eta_discount: 0.8,
            min_node_distance: 3.0,
            max_pruning_rounds: 100,
            gradient_step: 0.1,
            track_round_stats: false,
            max_curvature: 1000.0,
            deadline: None,
        }
    }
}

mod defaults {
    pub fn fast_odf_threshold() -> usize {
        10_000
    }

    pub fn cell_size() -> f64 {
        1.0
    }

    pub fn footprint_radius() -> f64 {
        0.15
    }

    pub fn gradient_descent_rounds() -> usize {
        5
    }

    pub fn eta() -> f64 {
        0.9
    }

    pub fn eta_discount() -> f64 {
        0.8
    }

    pub fn min_node_distance() -> f64 {
        3.0
    }

    pub fn max_pruning_rounds() -> usize {
        100
    }

    pub fn gradient_step() -> f64 {
        0.1
    }

    pub fn max_curvature() -> f64 {
        1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grips_defaults() {
        let config = GripsConfig::default();
        assert_eq!(config.gradient_descent_rounds, 5);
        assert_eq!(config.eta, 0.9);
        assert_eq!(config.eta_discount, 0.8);
        assert_eq!(config.min_node_distance, 3.0);
        assert_eq!(config.max_pruning_rounds, 100);
        assert!(config.deadline.is_none());
    }

    #[test]
    fn test_grid_defaults() {
        let config = GridConfig::default();
        assert_eq!(config.cell_size, 1.0);
        assert_eq!(config.footprint_radius, 0.15);
        assert_eq!(config.distance_field.method, DistanceFieldMethod::Auto);
        assert_eq!(config.distance_field.fast_odf_threshold, 10_000);
    }
}
