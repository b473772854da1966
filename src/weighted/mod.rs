//! Point-weighted engine: live cells kept individually, neighbor influence
//! accumulated in a reusable weight table.

mod engine;

pub use engine::WeightedLife;
