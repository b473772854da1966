//! Tile storage, addressing and border extraction for `BlockLife`.

use crate::point::Point;
use crate::rules::is_next_alive;

pub const BLOCK_SHIFT: u32 = 5;
pub const BLOCK_DIM: usize = 1 << BLOCK_SHIFT;
pub const BLOCK_CELLS: usize = BLOCK_DIM * BLOCK_DIM;
pub(crate) const BLOCK_DIM_I64: i64 = BLOCK_DIM as i64;
/// Clears the in-tile bits of a coordinate, leaving the tile origin.
pub(crate) const BLOCK_MASK: i64 = !(BLOCK_DIM_I64 - 1);
pub(crate) const LAST: usize = BLOCK_DIM - 1;

/// Offset of local cell `(x, y)` in a tile's flat array. Row-major, `y = 0`
/// is the bottom row.
#[inline(always)]
pub const fn index(x: usize, y: usize) -> usize {
    y * BLOCK_DIM + x
}

/// Origin (lower-left cell) of the tile containing `p`. Masking floors
/// toward negative infinity, so `-1` belongs to the tile at `-32`.
#[inline(always)]
pub const fn block_origin(p: Point) -> Point {
    Point::new(p.x & BLOCK_MASK, p.y & BLOCK_MASK)
}

/// Position of `p` inside its tile.
#[inline(always)]
pub const fn local_coords(p: Point) -> (usize, usize) {
    ((p.x & !BLOCK_MASK) as usize, (p.y & !BLOCK_MASK) as usize)
}

/// Neighbor range `i-1..=i+1` clipped to the tile.
#[inline(always)]
pub(crate) fn spread(i: usize) -> std::ops::RangeInclusive<usize> {
    i.saturating_sub(1)..=(i + 1).min(LAST)
}

/// Call `f` with the position of every set bit in `mask`, low to high.
#[inline(always)]
pub(crate) fn for_each_bit(mut mask: u32, mut f: impl FnMut(usize)) {
    while mask != 0 {
        f(mask.trailing_zeros() as usize);
        mask &= mask - 1;
    }
}

/// A tile's eight neighbors; `North` is toward larger `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    West,
    East,
    NW,
    NE,
    SW,
    SE,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
        Direction::NW,
        Direction::NE,
        Direction::SW,
        Direction::SE,
    ];

    /// Step to the neighboring tile, in tiles.
    #[inline]
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
            Direction::NW => (-1, 1),
            Direction::NE => (1, 1),
            Direction::SW => (-1, -1),
            Direction::SE => (1, -1),
        }
    }

    /// Origin of the tile adjacent to the one at `origin`.
    #[inline]
    pub const fn neighbor_origin(self, origin: Point) -> Point {
        let (dx, dy) = self.offset();
        origin.offset(dx * BLOCK_DIM_I64, dy * BLOCK_DIM_I64)
    }
}

/// Live cells on a tile's perimeter.
///
/// Rows are indexed by x, columns by y. Corners appear in both the row and
/// the column they sit on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BorderMask {
    /// Row `y = LAST`.
    pub north: u32,
    /// Row `y = 0`.
    pub south: u32,
    /// Column `x = 0`.
    pub west: u32,
    /// Column `x = LAST`.
    pub east: u32,
}

impl BorderMask {
    #[inline(always)]
    pub fn nw(&self) -> bool {
        self.north & 1 != 0
    }

    #[inline(always)]
    pub fn ne(&self) -> bool {
        (self.north >> LAST) & 1 != 0
    }

    #[inline(always)]
    pub fn sw(&self) -> bool {
        self.south & 1 != 0
    }

    #[inline(always)]
    pub fn se(&self) -> bool {
        (self.south >> LAST) & 1 != 0
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        (self.north | self.south | self.west | self.east) == 0
    }

    /// Whether a live cell on this border reaches into the tile in `dir`.
    #[inline]
    pub fn spills_into(&self, dir: Direction) -> bool {
        match dir {
            Direction::North => self.north != 0,
            Direction::South => self.south != 0,
            Direction::West => self.west != 0,
            Direction::East => self.east != 0,
            Direction::NW => self.nw(),
            Direction::NE => self.ne(),
            Direction::SW => self.sw(),
            Direction::SE => self.se(),
        }
    }
}

/// One 32×32 tile. Between generations each cell is 0 or 1; during a step
/// the write-side copy holds weighted accumulators.
#[derive(Clone, Debug, PartialEq, Eq)]
#[repr(C, align(64))]
pub struct BlockCells {
    cells: [u8; BLOCK_CELLS],
}

impl Default for BlockCells {
    fn default() -> Self {
        Self::empty()
    }
}

impl BlockCells {
    pub const fn empty() -> Self {
        Self {
            cells: [0; BLOCK_CELLS],
        }
    }

    #[inline(always)]
    pub fn cells(&self) -> &[u8; BLOCK_CELLS] {
        &self.cells
    }

    #[inline(always)]
    pub fn cells_mut(&mut self) -> &mut [u8; BLOCK_CELLS] {
        &mut self.cells
    }

    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[index(x, y)] != 0
    }

    #[inline(always)]
    pub fn set_alive(&mut self, x: usize, y: usize) {
        self.cells[index(x, y)] = 1;
    }

    #[inline(always)]
    pub fn add(&mut self, x: usize, y: usize, weight: u8) {
        self.cells[index(x, y)] += weight;
    }

    pub fn border(&self) -> BorderMask {
        let mut mask = BorderMask::default();
        for i in 0..BLOCK_DIM {
            mask.south |= ((self.cells[index(i, 0)] != 0) as u32) << i;
            mask.north |= ((self.cells[index(i, LAST)] != 0) as u32) << i;
            mask.west |= ((self.cells[index(0, i)] != 0) as u32) << i;
            mask.east |= ((self.cells[index(LAST, i)] != 0) as u32) << i;
        }
        mask
    }

    /// Collapse accumulators to 0/1 flags. Returns whether any cell lives.
    pub fn settle(&mut self) -> bool {
        let mut has_live = false;
        for cell in self.cells.iter_mut() {
            let alive = is_next_alive(*cell);
            *cell = alive as u8;
            has_live |= alive;
        }
        has_live
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    pub fn for_each_live<F: FnMut(usize, usize)>(&self, mut f: F) {
        for (row_index, row) in self.cells.chunks_exact(BLOCK_DIM).enumerate() {
            for (col, &cell) in row.iter().enumerate() {
                if cell != 0 {
                    f(col, row_index);
                }
            }
        }
    }
}
