//! Obstacle distance field construction.
//!
//! Both algorithms fill a `(width + 1) × (height + 1)` vertex lattice with
//! the Euclidean distance (in lattice units) from each vertex to the nearest
//! occupied vertex. A vertex is occupied when the cell it anchors is
//! occupied, so vertices inside obstacles carry distance zero.

use crate::config::{DistanceFieldConfig, DistanceFieldMethod};

/// Build the distance field over the vertex lattice of a `width × height`
/// cell grid. `occupied(x, y)` reports cell occupancy for `x < width`,
/// `y < height`.
pub fn compute<F>(width: usize, height: usize, occupied: F, config: &DistanceFieldConfig) -> Vec<f64>
where
    F: Fn(usize, usize) -> bool,
{
    let method = match config.method {
        DistanceFieldMethod::Auto => {
            if width * height > config.fast_odf_threshold {
                DistanceFieldMethod::DeadReckoning
            } else {
                DistanceFieldMethod::BruteForce
            }
        }
        other => other,
    };
    log::debug!(
        "computing {}x{} distance field via {:?}",
        width + 1,
        height + 1,
        method
    );
    match method {
        DistanceFieldMethod::DeadReckoning => dead_reckoning(width, height, occupied),
        _ => brute_force(width, height, occupied),
    }
}

/// Whether lattice vertex `(x, y)` is occupied: the vertex anchors cell
/// `(x, y)`, vertices on the far border anchor no cell.
fn vertex_occupied<F>(x: usize, y: usize, width: usize, height: usize, occupied: &F) -> bool
where
    F: Fn(usize, usize) -> bool,
{
    x < width && y < height && occupied(x, y)
}

/// Exact nearest-obstacle scan, O(vertices × obstacles).
fn brute_force<F>(width: usize, height: usize, occupied: F) -> Vec<f64>
where
    F: Fn(usize, usize) -> bool,
{
    let stride = width + 1;
    let rows = height + 1;

    let mut obstacles = Vec::new();
    for y in 0..rows {
        for x in 0..stride {
            if vertex_occupied(x, y, width, height, &occupied) {
                obstacles.push((x as f64, y as f64));
            }
        }
    }
    if obstacles.is_empty() {
        return vec![f64::MAX; stride * rows];
    }

    let mut distances = vec![f64::MAX; stride * rows];
    for y in 0..rows {
        for x in 0..stride {
            let mut best = f64::MAX;
            for &(ox, oy) in &obstacles {
                let dx = x as f64 - ox;
                let dy = y as f64 - oy;
                let d2 = dx * dx + dy * dy;
                if d2 < best {
                    best = d2;
                }
            }
            distances[y * stride + x] = best.sqrt();
        }
    }
    distances
}

/// Dead reckoning transform (Grevera). Two raster passes propagate the
/// nearest occupied vertex alongside the distance, recomputing the exact
/// Euclidean distance from the propagated vertex at every update, so the
/// result matches the brute force scan up to floating point rounding.
fn dead_reckoning<F>(width: usize, height: usize, occupied: F) -> Vec<f64>
where
    F: Fn(usize, usize) -> bool,
{
    let stride = (width + 1) as isize;
    let rows = (height + 1) as isize;
    let len = (stride * rows) as usize;

    const D1: f64 = 1.0;
    const D2: f64 = std::f64::consts::SQRT_2;

    let mut distances = vec![f64::MAX; len];
    let mut nearest: Vec<(isize, isize)> = vec![(-1, -1); len];

    for y in 0..rows {
        for x in 0..stride {
            if vertex_occupied(x as usize, y as usize, width, height, &occupied) {
                let idx = (y * stride + x) as usize;
                distances[idx] = 0.0;
                nearest[idx] = (x, y);
            }
        }
    }

    let relax = |x: isize, y: isize, ox: isize, oy: isize, delta: f64,
                     distances: &mut Vec<f64>,
                     nearest: &mut Vec<(isize, isize)>| {
        let nx = x + ox;
        let ny = y + oy;
        if nx < 0 || ny < 0 || nx >= stride || ny >= rows {
            return;
        }
        let idx = (y * stride + x) as usize;
        let nidx = (ny * stride + nx) as usize;
        if distances[nidx] + delta < distances[idx] {
            let (px, py) = nearest[nidx];
            let dx = (x - px) as f64;
            let dy = (y - py) as f64;
            nearest[idx] = (px, py);
            distances[idx] = (dx * dx + dy * dy).sqrt();
        }
    };

    // Forward pass: top-left to bottom-right.
    for y in 0..rows {
        for x in 0..stride {
            relax(x, y, -1, -1, D2, &mut distances, &mut nearest);
            relax(x, y, 0, -1, D1, &mut distances, &mut nearest);
            relax(x, y, 1, -1, D2, &mut distances, &mut nearest);
            relax(x, y, -1, 0, D1, &mut distances, &mut nearest);
        }
    }
    // Backward pass: bottom-right to top-left.
    for y in (0..rows).rev() {
        for x in (0..stride).rev() {
            relax(x, y, 1, 0, D1, &mut distances, &mut nearest);
            relax(x, y, -1, 1, D2, &mut distances, &mut nearest);
            relax(x, y, 0, 1, D1, &mut distances, &mut nearest);
            relax(x, y, 1, 1, D2, &mut distances, &mut nearest);
        }
    }

    distances
}
