//! Sparse Conway's Game of Life engines (B3/S23) over the full `i64` plane.
//!
//! Memory tracks the live population and its one-cell halo, never the
//! board size. Two engines implement [`Life`]:
//! - [`WeightedLife`] keeps live cells individually and accumulates
//!   neighbor weights in a hash table.
//! - [`BlockLife`] keeps 32×32 tiles and only propagates across tile edges
//!   that carry live cells.

pub mod block;
pub mod config;
pub mod error;
pub mod life;
pub mod pattern;
pub mod point;
pub mod rules;
pub mod weighted;

pub use block::BlockLife;
pub use config::{EngineKind, LifeConfig};
pub use error::{ParseEngineError, PatternError};
pub use life::Life;
pub use point::Point;
pub use weighted::WeightedLife;
