use crate::life::Life;
use crate::point::{Point, PointMap, point_map_with_capacity};
use crate::rules::{NEIGHBOR_WEIGHT, SELF_WEIGHT};

use super::tile::{
    BLOCK_DIM, BlockCells, BorderMask, Direction, LAST, block_origin, for_each_bit, index,
    local_coords, spread,
};

const INITIAL_BLOCK_CAPACITY: usize = 64;

/// Sparse engine that stores the live region as 32×32 tiles keyed by their
/// lower-left cell.
///
/// `blocks` is the read side and only ever holds tiles with at least one
/// live cell. `new_blocks` is the write side: filled with accumulators
/// during a step, thresholded, then swapped in. The old read side is
/// cleared and kept for the next step.
pub struct BlockLife {
    blocks: PointMap<BlockCells>,
    new_blocks: PointMap<BlockCells>,
    generation: u64,
}

impl Default for BlockLife {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockLife {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_BLOCK_CAPACITY)
    }

    /// Create an engine with room for `cap` occupied tiles before the maps
    /// first grow.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            blocks: point_map_with_capacity(cap),
            new_blocks: point_map_with_capacity(cap),
            generation: 0,
        }
    }

    /// Number of occupied tiles.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Origins of the occupied tiles, in map order.
    pub fn block_origins(&self) -> impl Iterator<Item = Point> + '_ {
        self.blocks.keys().copied()
    }
}

impl Life for BlockLife {
    fn add_point(&mut self, point: Point) {
        let (x, y) = local_coords(point);
        self.blocks
            .entry(block_origin(point))
            .or_default()
            .set_alive(x, y);
    }

    fn step(&mut self) {
        self.generation += 1;

        let new_blocks = &mut self.new_blocks;
        for (&origin, cells) in &self.blocks {
            let border = cells.border();

            let centre = new_blocks.entry(origin).or_default();
            splat_interior(cells, centre);
            splat_border_local(&border, centre);

            for dir in Direction::ALL {
                if border.spills_into(dir) {
                    let target = new_blocks.entry(dir.neighbor_origin(origin)).or_default();
                    splat_across(&border, dir, target);
                }
            }
        }

        new_blocks.retain(|_, cells| cells.settle());
        std::mem::swap(&mut self.blocks, &mut self.new_blocks);
        self.new_blocks.clear();
    }

    fn live_points(&self) -> Vec<Point> {
        let mut out = Vec::with_capacity(self.blocks.len() * 8);
        for (&origin, cells) in &self.blocks {
            cells.for_each_live(|x, y| out.push(origin.offset(x as i64, y as i64)));
        }
        out
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn name(&self) -> &'static str {
        "block"
    }

    fn population(&self) -> usize {
        self.blocks.values().map(BlockCells::population).sum()
    }

    fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    fn is_alive(&self, x: i64, y: i64) -> bool {
        let p = Point::new(x, y);
        let (lx, ly) = local_coords(p);
        self.blocks
            .get(&block_origin(p))
            .is_some_and(|cells| cells.get(lx, ly))
    }
}

/// Cells off the perimeter: every neighbor is in the same tile, so this is
/// plain array arithmetic with no clipping.
fn splat_interior(src: &BlockCells, dst: &mut BlockCells) {
    let src = src.cells();
    let dst = dst.cells_mut();
    for y in 1..LAST {
        let row = &src[index(0, y)..index(0, y + 1)];
        if row[1..LAST].iter().all(|&c| c == 0) {
            continue;
        }
        for x in 1..LAST {
            if row[x] == 0 {
                continue;
            }
            let below = index(x, y - 1);
            let here = index(x, y);
            let above = index(x, y + 1);
            for i in [below - 1, below, below + 1, here - 1, here + 1, above - 1, above, above + 1] {
                dst[i] += NEIGHBOR_WEIGHT;
            }
            dst[here] += SELF_WEIGHT;
        }
    }
}

/// In-tile share of every perimeter cell, clipped at the tile edge.
fn splat_border_local(border: &BorderMask, dst: &mut BlockCells) {
    let mut splat = |x: usize, y: usize| {
        for ny in spread(y) {
            for nx in spread(x) {
                let weight = if nx == x && ny == y { SELF_WEIGHT } else { NEIGHBOR_WEIGHT };
                dst.add(nx, ny, weight);
            }
        }
    };

    // Rows take the corners; columns skip them so each cell splats once.
    for_each_bit(border.south, |x| splat(x, 0));
    for_each_bit(border.north, |x| splat(x, LAST));
    let inner_column = !(1u32 | (1u32 << LAST));
    for_each_bit(border.west & inner_column, |y| splat(0, y));
    for_each_bit(border.east & inner_column, |y| splat(LAST, y));
}

/// Share of perimeter cells that lands in the neighbor tile in `dir`.
///
/// An edge cell at position `i` touches `i-1..=i+1` along the facing edge of
/// the neighbor; a corner cell touches only the facing corner of the
/// diagonal neighbor.
fn splat_across(border: &BorderMask, dir: Direction, dst: &mut BlockCells) {
    match dir {
        Direction::North => for_each_bit(border.north, |x| {
            for nx in spread(x) {
                dst.add(nx, 0, NEIGHBOR_WEIGHT);
            }
        }),
        Direction::South => for_each_bit(border.south, |x| {
            for nx in spread(x) {
                dst.add(nx, LAST, NEIGHBOR_WEIGHT);
            }
        }),
        Direction::West => for_each_bit(border.west, |y| {
            for ny in spread(y) {
                dst.add(LAST, ny, NEIGHBOR_WEIGHT);
            }
        }),
        Direction::East => for_each_bit(border.east, |y| {
            for ny in spread(y) {
                dst.add(0, ny, NEIGHBOR_WEIGHT);
            }
        }),
        Direction::NW => dst.add(LAST, 0, NEIGHBOR_WEIGHT),
        Direction::NE => dst.add(0, 0, NEIGHBOR_WEIGHT),
        Direction::SW => dst.add(LAST, LAST, NEIGHBOR_WEIGHT),
        Direction::SE => dst.add(0, LAST, NEIGHBOR_WEIGHT),
    }
}

const _: () = assert!(BLOCK_DIM >= 3, "interior splat assumes a non-empty interior");
