//! Gradient-informed path smoothing.
//!
//! The engine alternates two phases after recording the input path:
//! gradient descent rounds push interior nodes away from obstacles and
//! insert extra nodes at clearance minima, then pruning rounds remove every
//! node a shortest collision-free subpath can skip, until the node count
//! reaches a fixed point.

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::config::GripsConfig;
use crate::core::{average_angles, Pose2D, DEFAULT_EQUALITY_EPS};
use crate::env::Environment;
use crate::path::Path;
use crate::smoothing::collision::{update_angles, SegmentChecker};
use crate::smoothing::gradient::gradient_descent;
use crate::smoothing::round::{RoundStats, RoundType};
use crate::steering::Steering;

/// Why a smoothing run gave up.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SmoothingError {
    /// The pruning loop did not reach a node-count fixed point; the
    /// trajectory most likely still collides.
    #[error("pruning did not converge within {rounds} rounds")]
    PruningExhausted { rounds: usize },

    /// The configured deadline elapsed before the run finished.
    #[error("smoothing deadline exceeded")]
    DeadlineExceeded,
}

/// Outcome of one smoothing run.
#[derive(Clone, Debug, Default)]
pub struct SmoothingReport {
    /// `None` on success.
    pub failure: Option<SmoothingError>,
    /// Nodes added at clearance minima across all gradient descent rounds.
    pub inserted_nodes: usize,
    /// Pruning rounds executed.
    pub pruning_rounds: usize,
    /// Node count before pruning and after each pruning round.
    pub nodes_per_round: Vec<usize>,
    /// Per-round measurements, populated when
    /// [`GripsConfig::track_round_stats`] is set.
    pub rounds: Vec<RoundStats>,
    /// Total wall time of the run.
    pub smoothing_time: Duration,
}

impl SmoothingReport {
    /// Whether the run completed without giving up.
    pub fn success(&self) -> bool {
        self.failure.is_none()
    }
}

/// The smoothing engine, borrowing an environment and a steering function.
pub struct Grips<'a> {
    env: &'a dyn Environment,
    steering: &'a dyn Steering,
    config: GripsConfig,
}

impl<'a> Grips<'a> {
    pub fn new(env: &'a dyn Environment, steering: &'a dyn Steering, config: GripsConfig) -> Self {
        Self {
            env,
            steering,
            config,
        }
    }

    /// Engine settings.
    pub fn config(&self) -> &GripsConfig {
        &self.config
    }

    /// Smooth `path` in place. The first and last poses keep their
    /// positions; everything in between may move, appear or disappear.
    pub fn smooth(&self, path: &mut Path) -> SmoothingReport {
        let started = Instant::now();
        let mut report = SmoothingReport::default();
        let checker = SegmentChecker::new(self.env, self.steering);

        self.record_round(RoundType::Original, path, started, &mut report);
        if path.len() < 2 {
            report.smoothing_time = started.elapsed();
            return report;
        }

        update_angles(&mut path.poses, &checker, true, true);

        let mut eta = self.config.eta;
        for round in 0..self.config.gradient_descent_rounds {
            if self.deadline_exceeded(started) {
                return self.give_up(SmoothingError::DeadlineExceeded, started, report);
            }
            let round_start = Instant::now();
            log::debug!("gradient descent round {}", round + 1);

            gradient_descent(&mut path.poses, self.env, eta, self.config.gradient_step);
            eta *= self.config.eta_discount;
            update_angles(&mut path.poses, &checker, true, true);

            self.insert_nodes(path, &mut report);
            update_angles(&mut path.poses, &checker, true, true);

            self.record_round(RoundType::GradientDescent, path, round_start, &mut report);
        }

        report.nodes_per_round.push(path.len());
        let mut pruning_round = 1;
        loop {
            if self.deadline_exceeded(started) {
                return self.give_up(SmoothingError::DeadlineExceeded, started, report);
            }
            if pruning_round > self.config.max_pruning_rounds {
                log::error!(
                    "giving up pruning after {} rounds, the smoothed trajectory most likely collides",
                    pruning_round - 1
                );
                return self.give_up(
                    SmoothingError::PruningExhausted {
                        rounds: pruning_round - 1,
                    },
                    started,
                    report,
                );
            }
            let round_start = Instant::now();
            log::debug!("pruning round {}", pruning_round);
            pruning_round += 1;
            report.pruning_rounds += 1;

            let before = path.len();
            self.prune(path, &checker);
            report.nodes_per_round.push(path.len());
            self.record_round(RoundType::Pruning, path, round_start, &mut report);

            if path.len() == before {
                break;
            }
            log::debug!(
                "continuing pruning, node count changed from {} to {}",
                before,
                path.len()
            );
        }

        report.smoothing_time = started.elapsed();
        log::debug!(
            "post-smoothing succeeded after {} pruning rounds",
            report.pruning_rounds
        );
        report
    }

    /// Scan each segment's steered samples for local clearance minima and
    /// insert a node wherever the clearance stops falling and starts rising
    /// again, far enough from the surrounding nodes. Zero differences keep
    /// the falling state, so a flat stretch inside an obstacle still counts
    /// as part of the descent.
    fn insert_nodes(&self, path: &mut Path, report: &mut SmoothingReport) {
        if path.len() < 2 {
            return;
        }
        let poses = &path.poses;
        let min_distance = self.config.min_node_distance;

        let first = self.steering.steer(&poses[0], &poses[1]).poses;
        let mut last_distance = self.env.bilinear_distance(first[0].x, first[0].y);
        let mut descending = first.len() > 1
            && self.env.bilinear_distance(first[1].x, first[1].y) < last_distance;

        let mut smoothed: Vec<Pose2D> = Vec::with_capacity(poses.len());
        for pair in poses.windows(2) {
            let (current, next) = (pair[0], pair[1]);
            let mut last_node = current;
            smoothed.push(current);

            for sample in self.steering.steer(&current, &next).poses {
                let distance = self.env.bilinear_distance(sample.x, sample.y);
                let difference = distance - last_distance;
                if descending
                    && difference > 0.0
                    && last_node.distance(&sample) >= min_distance
                    && next.distance(&sample) >= min_distance
                {
                    let node = Pose2D::new(
                        sample.x,
                        sample.y,
                        average_angles(current.theta, next.theta),
                    );
                    smoothed.push(node);
                    last_node = node;
                    report.inserted_nodes += 1;
                }
                if difference < 0.0 {
                    descending = true;
                } else if difference > 0.0 {
                    descending = false;
                }
                last_distance = distance;
            }
        }
        smoothed.push(*poses.last().unwrap());
        path.poses = smoothed;
    }

    /// One pruning round: mark the nodes no collision-free segment can skip,
    /// then replace every stretch between consecutive marked nodes by the
    /// shortest collision-free subpath through its nodes.
    fn prune(&self, path: &mut Path, checker: &SegmentChecker<'_>) {
        let n = path.len();
        if n < 3 {
            return;
        }
        let poses = &mut path.poses;

        let mut irremovable: Vec<usize> = vec![0];
        for i in 1..n - 1 {
            let anchor = *irremovable.last().unwrap();
            if checker.segment_collides(&poses[anchor], &poses[i + 1]) {
                irremovable.push(i);
            }
        }
        irremovable.push(n - 1);

        update_angles(poses, checker, true, true);

        let mut pruned: Vec<Pose2D> = Vec::new();
        let push_deduped = |pruned: &mut Vec<Pose2D>, pose: Pose2D| {
            let duplicate = pruned
                .last()
                .is_some_and(|last| last.approx_eq(&pose, DEFAULT_EQUALITY_EPS));
            if !duplicate {
                pruned.push(pose);
            }
        };

        for window in irremovable.windows(2) {
            let (i, j) = (window[0], window[1]);
            push_deduped(&mut pruned, poses[i]);
            if j - i <= 1 {
                continue;
            }

            // Shortest collision-free subpath from node i to node j through
            // the intermediate nodes; edges are steered segments weighted by
            // their length. Relaxing in index order is exact since all edges
            // point forward.
            let m = j - i;
            let mut distances = vec![f64::MAX; m + 1];
            let mut predecessors: Vec<usize> =
                (0..=m).map(|k| k.saturating_sub(1)).collect();
            distances[0] = 0.0;
            for u in 0..m {
                if distances[u] == f64::MAX {
                    continue;
                }
                for v in u + 1..=m {
                    let Some(steered) = checker.steer_free(&poses[i + u], &poses[i + v]) else {
                        continue;
                    };
                    if distances[u] + steered.length < distances[v] {
                        distances[v] = distances[u] + steered.length;
                        predecessors[v] = u;
                    }
                }
            }

            let mut chain: Vec<usize> = Vec::new();
            let mut k = m;
            while k > 0 {
                chain.push(k);
                if predecessors[k] == k {
                    log::error!("loop in shortest subpath predecessors, keeping segment as is");
                    chain = (1..=m).rev().collect();
                    break;
                }
                k = predecessors[k];
            }
            for k in chain.into_iter().rev() {
                push_deduped(&mut pruned, poses[i + k]);
            }
        }
        let last = *poses.last().unwrap();
        push_deduped(&mut pruned, last);

        path.poses = pruned;
    }

    fn record_round(
        &self,
        round_type: RoundType,
        path: &Path,
        round_start: Instant,
        report: &mut SmoothingReport,
    ) {
        if !self.config.track_round_stats {
            return;
        }
        report.rounds.push(RoundStats::capture(
            round_type,
            path,
            self.env,
            self.steering,
            self.config.max_curvature,
            round_start.elapsed(),
        ));
    }

    fn deadline_exceeded(&self, started: Instant) -> bool {
        self.config
            .deadline
            .is_some_and(|deadline| started.elapsed() > deadline)
    }

    fn give_up(
        &self,
        error: SmoothingError,
        started: Instant,
        mut report: SmoothingReport,
    ) -> SmoothingReport {
        report.failure = Some(error);
        report.smoothing_time = started.elapsed();
        report
    }
}
