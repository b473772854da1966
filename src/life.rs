//! The contract shared by every engine.

use crate::point::{Point, bounding_box};

/// A Game of Life universe that can be seeded, stepped and read back.
///
/// Callers own serialization: nothing here is `Sync`-aware, and a step
/// always runs to completion. Adding points while a step is in progress is
/// impossible by construction (`&mut self`).
pub trait Life {
    /// Mark `point` alive in the current generation. Idempotent.
    fn add_point(&mut self, point: Point);

    /// Advance exactly one generation under B3/S23.
    fn step(&mut self);

    /// Materialize every live cell of the current generation. Order is
    /// unspecified; each call walks live storage afresh.
    fn live_points(&self) -> Vec<Point>;

    /// Number of completed steps. Starts at 0.
    fn generation(&self) -> u64;

    /// Short engine name for logs.
    fn name(&self) -> &'static str;

    fn add_live_point(&mut self, x: i64, y: i64) {
        self.add_point(Point::new(x, y));
    }

    fn add_points(&mut self, points: &[Point]) {
        for &p in points {
            self.add_point(p);
        }
    }

    fn step_n(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
    }

    fn population(&self) -> usize {
        self.live_points().len()
    }

    fn is_empty(&self) -> bool {
        self.population() == 0
    }

    fn is_alive(&self, x: i64, y: i64) -> bool {
        let target = Point::new(x, y);
        self.live_points().contains(&target)
    }

    /// Inclusive `(min_x, min_y, max_x, max_y)` of the live cells.
    fn bounds(&self) -> Option<(i64, i64, i64, i64)> {
        bounding_box(self.live_points())
    }
}
