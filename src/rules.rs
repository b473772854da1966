//! B3/S23 over weighted neighbor accumulators.
//!
//! Both engines splat `NEIGHBOR_WEIGHT` onto each Moore neighbor of a live
//! cell and `SELF_WEIGHT` onto the cell itself, so a single accumulator
//! encodes both the live-neighbor count and whether the cell was alive.
//! The table below decodes that back into the next state.

/// Added to each of the 8 neighbors of a live cell.
pub const NEIGHBOR_WEIGHT: u8 = 1;
/// Added to a live cell itself: 10 marks "was alive", plus one more so the
/// survivors land on 13 and 14 instead of overlapping the birth count.
pub const SELF_WEIGHT: u8 = 11;

pub struct RuleTable {
    table: [bool; 256],
}

impl RuleTable {
    pub const fn new() -> Self {
        let mut table = [false; 256];
        let mut weight = 0usize;
        while weight < 256 {
            table[weight] = output_for(weight as u8);
            weight += 1;
        }
        Self { table }
    }

    #[inline(always)]
    pub fn lookup(&self, weight: u8) -> bool {
        self.table[weight as usize]
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Conway's rule, precomputed for every `u8` accumulator.
pub static B3S23: RuleTable = RuleTable::new();

/// Whether a cell with accumulated weight `weight` is alive next generation.
/// Holds exactly for 3 (birth), 13 and 14 (survival with 2 or 3 neighbors).
#[inline(always)]
pub fn is_next_alive(weight: u8) -> bool {
    B3S23.lookup(weight)
}

const fn output_for(weight: u8) -> bool {
    // A live cell contributes SELF_WEIGHT; at most 8 neighbors contribute
    // NEIGHBOR_WEIGHT each, so anything past 8 + SELF_WEIGHT is unreachable.
    if weight > 8 + SELF_WEIGHT {
        return false;
    }
    let alive = weight >= SELF_WEIGHT;
    let neighbors = if alive { weight - SELF_WEIGHT } else { weight };
    if alive {
        neighbors == 2 || neighbors == 3
    } else {
        neighbors == 3
    }
}
