//! Block-windowed engine: the plane is cut into 32×32 tiles, each a flat
//! array of per-cell accumulators, and only tile edges carrying live cells
//! propagate influence into neighbor tiles.

mod engine;
pub(crate) mod tile;

pub use engine::BlockLife;
pub use tile::{BLOCK_DIM, block_origin, index, local_coords};
