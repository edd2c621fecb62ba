//! Occupancy grid environment with a lazily built distance field.

use std::fmt;
use std::sync::OnceLock;

use crate::config::GridConfig;
use crate::core::Pose2D;
use crate::env::{distance_field, Environment};

/// A `width × height` boolean occupancy grid.
///
/// Cells are `cell_size` world units on a side; cell `(0, 0)` covers the
/// world square `[0, cell_size) × [0, cell_size)`. The obstacle distance
/// field is built on first clearance query and rebuilt after the grid is
/// mutated.
pub struct GridEnvironment {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    config: GridConfig,
    start: Pose2D,
    goal: Pose2D,
    // Distances at the (width+1) x (height+1) vertex lattice, world units.
    distances: OnceLock<Vec<f64>>,
}

impl GridEnvironment {
    /// Create an empty grid with default settings.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_config(width, height, GridConfig::default())
    }

    /// Create an empty grid with the given settings.
    pub fn with_config(width: usize, height: usize, config: GridConfig) -> Self {
        assert!(width > 0 && height > 0, "grid must have at least one cell");
        let goal = Pose2D::new(
            width as f64 * config.cell_size,
            height as f64 * config.cell_size,
            0.0,
        );
        Self {
            width,
            height,
            cells: vec![false; width * height],
            config,
            start: Pose2D::default(),
            goal,
            distances: OnceLock::new(),
        }
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Environment settings.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Start anchor pose.
    pub fn start(&self) -> Pose2D {
        self.start
    }

    /// Goal anchor pose.
    pub fn goal(&self) -> Pose2D {
        self.goal
    }

    /// Set the start anchor pose.
    pub fn set_start(&mut self, start: Pose2D) {
        self.start = start;
    }

    /// Set the goal anchor pose.
    pub fn set_goal(&mut self, goal: Pose2D) {
        self.goal = goal;
    }

    /// Set the start and goal headings, keeping their positions.
    pub fn set_thetas(&mut self, start_theta: f64, goal_theta: f64) {
        self.start.theta = start_theta;
        self.goal.theta = goal_theta;
    }

    /// Whether cell `(x, y)` is occupied. Out-of-range cells read as free.
    pub fn occupied_cell(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    /// Mark cell `(x, y)` as occupied.
    pub fn fill(&mut self, x: usize, y: usize) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = true;
            self.invalidate();
        }
    }

    /// Mark every cell in the inclusive rectangle as occupied.
    pub fn fill_rect(&mut self, x1: usize, y1: usize, x2: usize, y2: usize) {
        for y in y1..=y2.min(self.height.saturating_sub(1)) {
            for x in x1..=x2.min(self.width.saturating_sub(1)) {
                self.cells[y * self.width + x] = true;
            }
        }
        self.invalidate();
    }

    /// Mark a border of the given thickness (in cells) as occupied.
    pub fn fill_border(&mut self, thickness: usize) {
        if thickness == 0 {
            return;
        }
        let t = thickness;
        self.fill_rect(0, 0, self.width - 1, t.min(self.height) - 1);
        self.fill_rect(0, self.height.saturating_sub(t), self.width - 1, self.height - 1);
        self.fill_rect(0, 0, t.min(self.width) - 1, self.height - 1);
        self.fill_rect(self.width.saturating_sub(t), 0, self.width - 1, self.height - 1);
    }

    /// Fraction of occupied cells.
    pub fn obstacle_ratio(&self) -> f64 {
        let occupied = self.cells.iter().filter(|&&c| c).count();
        occupied as f64 / self.cells.len() as f64
    }

    /// Clearance at lattice vertex `(x, y)`, `x ≤ width`, `y ≤ height`,
    /// in world units.
    pub fn vertex_distance(&self, x: usize, y: usize) -> f64 {
        let d = self.distances()[y * (self.width + 1) + x];
        if d == f64::MAX {
            d
        } else {
            d * self.config.cell_size
        }
    }

    fn distances(&self) -> &[f64] {
        self.distances.get_or_init(|| {
            distance_field::compute(
                self.width,
                self.height,
                |x, y| self.cells[y * self.width + x],
                &self.config.distance_field,
            )
        })
    }

    fn invalidate(&mut self) {
        self.distances.take();
    }

    /// Cell index under the world point `(x, y)`; the caller guarantees the
    /// point is in bounds. Points on the far border map to the last cell.
    fn cell_under(&self, x: f64, y: f64) -> (usize, usize) {
        let cx = ((x / self.config.cell_size) as usize).min(self.width - 1);
        let cy = ((y / self.config.cell_size) as usize).min(self.height - 1);
        (cx, cy)
    }

    fn occupied_at(&self, x: f64, y: f64) -> bool {
        let (cx, cy) = self.cell_under(x, y);
        self.cells[cy * self.width + cx]
    }
}

impl Environment for GridEnvironment {
    fn max_x(&self) -> f64 {
        self.width as f64 * self.config.cell_size
    }

    fn max_y(&self) -> f64 {
        self.height as f64 * self.config.cell_size
    }

    fn collides(&self, x: f64, y: f64) -> bool {
        if !self.in_bounds(x, y) {
            return true;
        }
        let r = self.config.footprint_radius;
        for &ox in &[-r, 0.0, r] {
            for &oy in &[-r, 0.0, r] {
                let px = x + ox;
                let py = y + oy;
                if self.in_bounds(px, py) && self.occupied_at(px, py) {
                    return true;
                }
            }
        }
        false
    }

    fn bilinear_distance(&self, x: f64, y: f64) -> f64 {
        let cs = self.config.cell_size;
        let u = (x / cs).clamp(0.0, self.width as f64);
        let v = (y / cs).clamp(0.0, self.height as f64);
        let x1 = (u as usize).min(self.width - 1);
        let y1 = (v as usize).min(self.height - 1);
        let tx = u - x1 as f64;
        let ty = v - y1 as f64;

        let tl = self.vertex_distance(x1, y1);
        let tr = self.vertex_distance(x1 + 1, y1);
        let bl = self.vertex_distance(x1, y1 + 1);
        let br = self.vertex_distance(x1 + 1, y1 + 1);

        // Lerp form so uniform samples interpolate exactly, even at f64::MAX.
        let top = tl + (tr - tl) * tx;
        let bottom = bl + (br - bl) * tx;
        top + (bottom - top) * ty
    }
}

impl fmt::Display for GridEnvironment {
    /// ASCII render, one character per cell, row `height-1` first so the
    /// origin lands at the bottom left. `#` occupied, `.` free, `S`/`G`
    /// the cells under the start and goal anchors.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.cell_under(
            self.start.x.clamp(0.0, self.max_x()),
            self.start.y.clamp(0.0, self.max_y()),
        );
        let goal = self.cell_under(
            self.goal.x.clamp(0.0, self.max_x()),
            self.goal.y.clamp(0.0, self.max_y()),
        );
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let c = if (x, y) == start {
                    'S'
                } else if (x, y) == goal {
                    'G'
                } else if self.occupied_cell(x, y) {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fill_and_ratio() {
        let mut grid = GridEnvironment::new(4, 4);
        assert_eq!(grid.obstacle_ratio(), 0.0);
        grid.fill(1, 1);
        grid.fill_rect(2, 2, 3, 3);
        assert!(grid.occupied_cell(1, 1));
        assert!(grid.occupied_cell(3, 3));
        assert!(!grid.occupied_cell(0, 0));
        assert_relative_eq!(grid.obstacle_ratio(), 5.0 / 16.0, epsilon = 1e-12);
    }

    #[test]
    fn test_fill_border() {
        let mut grid = GridEnvironment::new(5, 5);
        grid.fill_border(1);
        assert!(grid.occupied_cell(0, 2));
        assert!(grid.occupied_cell(4, 2));
        assert!(grid.occupied_cell(2, 0));
        assert!(grid.occupied_cell(2, 4));
        assert!(!grid.occupied_cell(2, 2));
    }

    #[test]
    fn test_collides_out_of_bounds() {
        let grid = GridEnvironment::new(4, 4);
        assert!(grid.collides(-0.5, 1.0));
        assert!(grid.collides(1.0, 4.5));
        assert!(!grid.collides(2.0, 2.0));
    }

    #[test]
    fn test_collides_footprint() {
        let mut grid = GridEnvironment::new(4, 4);
        grid.fill(2, 2);
        // Point just outside the cell, but within footprint reach of it.
        assert!(grid.collides(1.9, 2.5));
        // Far enough from the obstacle.
        assert!(!grid.collides(1.0, 0.5));
        // Inside the cell.
        assert!(grid.collides(2.5, 2.5));
    }

    #[test]
    fn test_vertex_distance() {
        let mut grid = GridEnvironment::new(4, 4);
        grid.fill(2, 2);
        assert_relative_eq!(grid.vertex_distance(2, 2), 0.0, epsilon = 1e-12);
        assert_relative_eq!(grid.vertex_distance(0, 2), 2.0, epsilon = 1e-12);
        assert_relative_eq!(grid.vertex_distance(4, 4), 8.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_bilinear_continuity_at_cell_boundary() {
        let mut grid = GridEnvironment::new(6, 6);
        grid.fill(3, 3);
        let eps = 1e-9;
        let left = grid.bilinear_distance(2.0 - eps, 1.5);
        let right = grid.bilinear_distance(2.0 + eps, 1.5);
        assert_relative_eq!(left, right, epsilon = 1e-6);
    }

    #[test]
    fn test_bilinear_empty_grid() {
        let grid = GridEnvironment::new(4, 4);
        assert_eq!(grid.bilinear_distance(1.7, 2.3), f64::MAX);
        let (dx, dy) = grid.distance_gradient(1.7, 2.3, 0.1).unwrap();
        assert_eq!(dx, 0.0);
        assert_eq!(dy, 0.0);
    }

    #[test]
    fn test_mutation_invalidates_distances() {
        let mut grid = GridEnvironment::new(4, 4);
        assert_eq!(grid.bilinear_distance(2.0, 2.0), f64::MAX);
        grid.fill(2, 2);
        assert!(grid.bilinear_distance(2.0, 2.0) < 1.0);
    }

    #[test]
    fn test_gradient_out_of_bounds() {
        let grid = GridEnvironment::new(4, 4);
        assert!(grid.distance_gradient(-1.0, 2.0, 0.1).is_none());
    }

    #[test]
    fn test_display_render() {
        let mut grid = GridEnvironment::new(3, 2);
        grid.fill(1, 0);
        grid.set_start(Pose2D::new(0.5, 1.5, 0.0));
        grid.set_goal(Pose2D::new(2.5, 0.5, 0.0));
        assert_eq!(format!("{}", grid), "S..\n.#G\n");
    }
}
