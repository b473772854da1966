use crate::life::Life;
use crate::point::{Point, PointMap, point_map_with_capacity};
use crate::rules::{NEIGHBOR_WEIGHT, SELF_WEIGHT, is_next_alive};

const INITIAL_WEIGHT_CAPACITY: usize = 1_024;

/// Moore neighborhood offsets, excluding the centre.
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Sparse engine over the full `i64` plane, memory proportional to
/// `live cells × 9`.
///
/// `weights` is a working buffer, not simulation state: between steps every
/// retained entry holds 0. An entry that receives no influence during a step
/// is still 0 when the step classifies it and is evicted then, so only cells
/// touched in the latest round survive in the table.
pub struct WeightedLife {
    live: Vec<Point>,
    weights: PointMap<u8>,
    generation: u64,
    /// Set when seeding may have pushed a point twice.
    needs_dedup: bool,
}

impl Default for WeightedLife {
    fn default() -> Self {
        Self::new()
    }
}

impl WeightedLife {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_WEIGHT_CAPACITY)
    }

    /// Create an engine whose weight table has room for `cap` cells before
    /// it first grows.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            live: Vec::new(),
            weights: point_map_with_capacity(cap),
            generation: 0,
            needs_dedup: false,
        }
    }

    /// Entries currently retained in the weight table.
    pub fn weight_table_len(&self) -> usize {
        self.weights.len()
    }

    fn dedup_seeds(&mut self) {
        if self.needs_dedup {
            self.live.sort_unstable();
            self.live.dedup();
            self.needs_dedup = false;
        }
    }

    fn accumulate(&mut self) {
        for &p in &self.live {
            for (dx, dy) in NEIGHBOR_OFFSETS {
                *self.weights.entry(p.offset(dx, dy)).or_insert(0) += NEIGHBOR_WEIGHT;
            }
            *self.weights.entry(p).or_insert(0) += SELF_WEIGHT;
        }
    }

    fn classify(&mut self) {
        let live = &mut self.live;
        live.clear();
        self.weights.retain(|&p, weight| {
            if *weight == 0 {
                return false;
            }
            if is_next_alive(*weight) {
                live.push(p);
            }
            *weight = 0;
            true
        });
    }
}

impl Life for WeightedLife {
    fn add_point(&mut self, point: Point) {
        if !self.live.is_empty() {
            self.needs_dedup = true;
        }
        self.live.push(point);
    }

    fn step(&mut self) {
        self.generation += 1;
        self.dedup_seeds();
        self.accumulate();
        self.classify();
    }

    fn live_points(&self) -> Vec<Point> {
        let mut out = self.live.clone();
        if self.needs_dedup {
            out.sort_unstable();
            out.dedup();
        }
        out
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn name(&self) -> &'static str {
        "weighted"
    }

    fn population(&self) -> usize {
        if self.needs_dedup {
            self.live_points().len()
        } else {
            self.live.len()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::WeightedLife;
    use crate::life::Life;
    use crate::point::Point;

    #[test]
    fn weights_are_reset_between_steps() {
        let mut engine = WeightedLife::new();
        for p in [(0, 0), (1, 0), (2, 0)] {
            engine.add_live_point(p.0, p.1);
        }
        engine.step();
        assert!(engine.weights.values().all(|&w| w == 0));
        // Blinker: 3 cells × 9 touched, minus overlap = 15 distinct cells.
        assert_eq!(engine.weight_table_len(), 15);
    }

    #[test]
    fn stale_entries_are_evicted_after_one_idle_round() {
        let mut engine = WeightedLife::new();
        for p in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            engine.add_live_point(p.0, p.1);
        }
        engine.step();
        let block_footprint = engine.weight_table_len();
        assert_eq!(block_footprint, 16);

        // A distant singleton leaves a 3×3 footprint, then dies.
        engine.add_live_point(100, 100);
        engine.step();
        assert_eq!(engine.weight_table_len(), block_footprint + 9);

        // The singleton's footprint received nothing this round and is pruned.
        engine.step();
        assert_eq!(engine.weight_table_len(), block_footprint);
        assert!(!engine.is_alive(100, 100));
    }

    #[test]
    fn duplicate_seeds_collapse_before_stepping() {
        let mut engine = WeightedLife::new();
        for _ in 0..3 {
            engine.add_point(Point::new(0, 0));
            engine.add_point(Point::new(1, 0));
            engine.add_point(Point::new(2, 0));
        }
        assert_eq!(engine.population(), 3);
        engine.step();
        let mut live = engine.live_points();
        live.sort_unstable();
        assert_eq!(live, vec![Point::new(1, -1), Point::new(1, 0), Point::new(1, 1)]);
    }

    #[test]
    fn far_apart_cells_do_not_interact() {
        let mut engine = WeightedLife::new();
        for p in [(i64::MIN / 2, 0), (i64::MIN / 2 + 1, 0), (i64::MIN / 2 + 2, 0)] {
            engine.add_live_point(p.0, p.1);
        }
        for p in [(1 << 40, 1 << 40), (1 << 40, (1 << 40) + 1), (1 << 40, (1 << 40) + 2)] {
            engine.add_live_point(p.0, p.1);
        }
        engine.step_n(2);
        assert_eq!(engine.population(), 6);
        assert!(engine.is_alive(i64::MIN / 2 + 1, 0));
        assert!(engine.is_alive(1 << 40, (1 << 40) + 1));
    }
}
