use std::collections::HashSet;

use rand::Rng;
use rand::SeedableRng;
use sparse_life::{BlockLife, Life, Point, WeightedLife};

fn engines() -> Vec<Box<dyn Life>> {
    vec![Box::new(WeightedLife::new()), Box::new(BlockLife::new())]
}

fn set_cells(engine: &mut dyn Life, cells: &[(i64, i64)]) {
    for &(x, y) in cells {
        engine.add_live_point(x, y);
    }
}

fn collect_live(engine: &dyn Life) -> HashSet<(i64, i64)> {
    engine.live_points().into_iter().map(<(i64, i64)>::from).collect()
}

fn assert_alive(engine: &dyn Life, cells: &[(i64, i64)]) {
    for &(x, y) in cells {
        assert!(engine.is_alive(x, y), "{}: expected alive at ({x},{y})", engine.name());
    }
}

fn assert_dead(engine: &dyn Life, cells: &[(i64, i64)]) {
    for &(x, y) in cells {
        assert!(!engine.is_alive(x, y), "{}: expected dead at ({x},{y})", engine.name());
    }
}

fn step_naive(cells: &HashSet<(i64, i64)>) -> HashSet<(i64, i64)> {
    let mut next = HashSet::new();
    let mut candidates = HashSet::new();
    for &(x, y) in cells {
        for dy in -1..=1 {
            for dx in -1..=1 {
                candidates.insert((x + dx, y + dy));
            }
        }
    }

    for (x, y) in candidates {
        let mut neighbors = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if cells.contains(&(x + dx, y + dy)) {
                    neighbors += 1;
                }
            }
        }
        let alive = cells.contains(&(x, y));
        let next_alive = if alive {
            neighbors == 2 || neighbors == 3
        } else {
            neighbors == 3
        };
        if next_alive {
            next.insert((x, y));
        }
    }

    next
}

/// Offsets of the 8 Moore neighbors of (0, 0).
const RING: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[test]
fn centre_cell_follows_b3_s23_for_every_neighborhood() {
    // All 2^9 neighborhoods of a single cell, placed on a tile corner so the
    // block engine's cross-tile paths are exercised too.
    let (cx, cy) = (32, 32);
    for mask in 0u32..512 {
        let centre_alive = mask & 256 != 0;
        let mut cells = Vec::new();
        for (bit, &(dx, dy)) in RING.iter().enumerate() {
            if mask & (1 << bit) != 0 {
                cells.push((cx + dx, cy + dy));
            }
        }
        let neighbors = cells.len();
        if centre_alive {
            cells.push((cx, cy));
        }
        let expected = neighbors == 3 || (neighbors == 2 && centre_alive);

        for mut engine in engines() {
            set_cells(engine.as_mut(), &cells);
            engine.step();
            assert_eq!(
                engine.is_alive(cx, cy),
                expected,
                "{}: mask {mask:09b} neighbors {neighbors} alive {centre_alive}",
                engine.name()
            );
        }
    }
}

#[test]
fn block_is_stable() {
    for mut engine in engines() {
        let block = [(0, 0), (1, 0), (0, 1), (1, 1)];
        set_cells(engine.as_mut(), &block);

        engine.step_n(10);

        assert_eq!(collect_live(engine.as_ref()), block.into_iter().collect::<HashSet<_>>());
        assert_dead(engine.as_ref(), &[(2, 0), (2, 1), (-1, 0), (-1, 1)]);
    }
}

#[test]
fn blinker_oscillates() {
    for mut engine in engines() {
        set_cells(engine.as_mut(), &[(0, 0), (1, 0), (2, 0)]);

        engine.step();
        assert_alive(engine.as_ref(), &[(1, -1), (1, 0), (1, 1)]);
        assert_dead(engine.as_ref(), &[(0, 0), (2, 0)]);

        engine.step();
        assert_alive(engine.as_ref(), &[(0, 0), (1, 0), (2, 0)]);
        assert_dead(engine.as_ref(), &[(1, -1), (1, 1)]);
        assert_eq!(engine.population(), 3);
    }
}

#[test]
fn glider_moves_down_right_every_four_steps() {
    for mut engine in engines() {
        let glider = [(1, 0), (2, -1), (0, -2), (1, -2), (2, -2)];
        set_cells(engine.as_mut(), &glider);

        engine.step_n(4);

        let shifted: HashSet<(i64, i64)> =
            glider.iter().map(|&(x, y)| (x + 1, y - 1)).collect();
        assert_eq!(collect_live(engine.as_ref()), shifted, "{}", engine.name());
        assert_eq!(engine.generation(), 4);
    }
}

#[test]
fn glider_crosses_many_tiles() {
    for mut engine in engines() {
        let glider = [(1, 0), (2, -1), (0, -2), (1, -2), (2, -2)];
        set_cells(engine.as_mut(), &glider);

        engine.step_n(4 * 100);

        let shifted: HashSet<(i64, i64)> =
            glider.iter().map(|&(x, y)| (x + 100, y - 100)).collect();
        assert_eq!(collect_live(engine.as_ref()), shifted, "{}", engine.name());
    }
}

#[test]
fn generation_counts_every_step() {
    for mut engine in engines() {
        assert_eq!(engine.generation(), 0);
        engine.step();
        assert_eq!(engine.generation(), 1);
        set_cells(engine.as_mut(), &[(0, 0), (1, 0), (0, 1), (1, 1)]);
        engine.step_n(5);
        assert_eq!(engine.generation(), 6);
    }
}

#[test]
fn empty_universe_stays_empty() {
    for mut engine in engines() {
        engine.step_n(10);
        assert_eq!(engine.population(), 0);
        assert!(engine.is_empty());
        assert!(engine.live_points().is_empty());
        assert_eq!(engine.bounds(), None);
    }
}

#[test]
fn lone_cell_dies() {
    for mut engine in engines() {
        engine.add_live_point(0, 0);
        engine.step_n(5);

        assert_eq!(engine.population(), 0);
        assert!(engine.is_empty());
        assert_eq!(engine.bounds(), None);
    }
}

#[test]
fn seeding_twice_matches_seeding_once() {
    let cells = [(5, 5), (6, 5), (7, 5), (7, 6), (6, 7)];
    for (mut once, mut twice) in engines().into_iter().zip(engines()) {
        set_cells(once.as_mut(), &cells);
        set_cells(twice.as_mut(), &cells);
        set_cells(twice.as_mut(), &cells);

        assert_eq!(collect_live(once.as_ref()), collect_live(twice.as_ref()));
        assert_eq!(twice.live_points().len(), cells.len());
        for _ in 0..6 {
            once.step();
            twice.step();
            assert_eq!(collect_live(once.as_ref()), collect_live(twice.as_ref()));
        }
    }
}

#[test]
fn seeding_between_steps() {
    for mut engine in engines() {
        set_cells(engine.as_mut(), &[(0, 0), (1, 0), (2, 0)]);

        engine.step();
        // Re-adding a live cell is a no-op; a new distant block persists.
        engine.add_live_point(1, 0);
        set_cells(engine.as_mut(), &[(50, 50), (51, 50), (50, 51), (51, 51)]);
        assert_eq!(engine.population(), 7);
        engine.step();
        assert_alive(engine.as_ref(), &[(0, 0), (1, 0), (2, 0), (50, 50), (51, 51)]);
        assert_eq!(engine.population(), 7);
    }
}

#[test]
fn live_points_has_no_duplicates() {
    for mut engine in engines() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0xD0_D0);
        for _ in 0..500 {
            engine.add_live_point(rng.random_range(-40..40), rng.random_range(-40..40));
        }
        for _ in 0..5 {
            let live = engine.live_points();
            let unique: HashSet<Point> = live.iter().copied().collect();
            assert_eq!(live.len(), unique.len(), "{}", engine.name());
            engine.step();
        }
    }
}

#[test]
fn matches_naive_on_small_random_seed() {
    for mut engine in engines() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0xBADC0FFEE);

        let mut naive = HashSet::new();
        for y in -8..=8 {
            for x in -8..=8 {
                if rng.random::<f64>() < 0.33 {
                    engine.add_live_point(x, y);
                    naive.insert((x, y));
                }
            }
        }

        for _ in 0..8 {
            assert_eq!(collect_live(engine.as_ref()), naive, "{}", engine.name());
            engine.step();
            naive = step_naive(&naive);
        }
    }
}

#[test]
fn huge_coordinates_behave_like_the_origin() {
    let far = 1i64 << 40;
    for mut engine in engines() {
        let glider = [(1, 0), (2, -1), (0, -2), (1, -2), (2, -2)];
        let cells: Vec<(i64, i64)> = glider.iter().map(|&(x, y)| (x - far, y + far)).collect();
        set_cells(engine.as_mut(), &cells);
        engine.step_n(8);
        let expected: HashSet<(i64, i64)> = cells.iter().map(|&(x, y)| (x + 2, y - 2)).collect();
        assert_eq!(collect_live(engine.as_ref()), expected, "{}", engine.name());
        assert_eq!(
            engine.bounds(),
            Some((2 - far, far - 4, 4 - far, far - 2)),
            "{}",
            engine.name()
        );
    }
}
