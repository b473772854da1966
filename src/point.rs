//! Cell coordinates and the point-keyed hash containers shared by both engines.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{BuildHasherDefault, Hasher};

/// A cell address on the signed 64-bit plane. `y` grows upward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    #[inline(always)]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`. Wraps at the edge of the `i64` range; the
    /// simulation makes no promises that close to the boundary.
    #[inline(always)]
    pub const fn offset(self, dx: i64, dy: i64) -> Self {
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
        }
    }
}

impl From<(i64, i64)> for Point {
    #[inline]
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (i64, i64) {
    #[inline]
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── Hashing ─────────────────────────────────────────────────────────────

/// Two distinct Fibonacci-derived constants so x and y mix independently.
/// A single multiplier collides systematically on grid-aligned keys, which
/// is exactly what block origins (multiples of 32) look like.
const MX: u64 = 0x517c_c1b7_2722_0a95;
const MY: u64 = 0x6c62_272e_07bb_0142;

/// Streaming hasher specialised for `Point`'s derived `Hash`, which feeds
/// `x` then `y` through `write_i64`.
#[derive(Clone, Copy, Default)]
pub struct PointHasher {
    state: u64,
    words: u8,
}

impl PointHasher {
    #[inline(always)]
    fn mix(&mut self, word: u64) {
        let m = if self.words & 1 == 0 { MX } else { MY };
        self.state = self.state.rotate_right(31) ^ word.wrapping_mul(m);
        self.words = self.words.wrapping_add(1);
    }
}

impl Hasher for PointHasher {
    #[inline(always)]
    fn finish(&self) -> u64 {
        // Fold the high bits down: hashbrown takes its bucket index from the
        // low bits and its control tag from the top seven.
        self.state ^ (self.state >> 29)
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for chunk in bytes.chunks(8) {
            let mut buf = [0u8; 8];
            buf[..chunk.len()].copy_from_slice(chunk);
            self.mix(u64::from_le_bytes(buf));
        }
    }

    #[inline(always)]
    fn write_i64(&mut self, value: i64) {
        self.mix(value as u64);
    }

    #[inline(always)]
    fn write_u64(&mut self, value: u64) {
        self.mix(value);
    }
}

pub type PointBuildHasher = BuildHasherDefault<PointHasher>;

/// Hash map keyed by [`Point`] using [`PointHasher`].
pub type PointMap<V> = HashMap<Point, V, PointBuildHasher>;

/// Hash set of [`Point`]s using [`PointHasher`].
pub type PointSet = HashSet<Point, PointBuildHasher>;

pub fn point_map_with_capacity<V>(cap: usize) -> PointMap<V> {
    PointMap::with_capacity_and_hasher(cap, PointBuildHasher::default())
}

/// Inclusive `(min_x, min_y, max_x, max_y)` of a point sequence, or `None`
/// when it is empty.
pub fn bounding_box<I>(points: I) -> Option<(i64, i64, i64, i64)>
where
    I: IntoIterator<Item = Point>,
{
    let mut min_x = i64::MAX;
    let mut min_y = i64::MAX;
    let mut max_x = i64::MIN;
    let mut max_y = i64::MIN;
    let mut seen = false;

    for p in points {
        seen = true;
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    seen.then_some((min_x, min_y, max_x, max_y))
}
