//! Engine selection and construction.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::block::BlockLife;
use crate::error::ParseEngineError;
use crate::life::Life;
use crate::weighted::WeightedLife;

/// Environment variable naming the engine (`weighted` or `block`).
pub const ENGINE_ENV: &str = "SPARSE_LIFE_ENGINE";
/// Environment variable giving the initial hash-table capacity.
pub const CAPACITY_ENV: &str = "SPARSE_LIFE_CAPACITY";

/// The available sparse engines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EngineKind {
    /// Per-cell weight table, see [`WeightedLife`].
    Weighted,
    /// 32×32 tiles, see [`BlockLife`].
    #[default]
    Block,
}

impl FromStr for EngineKind {
    type Err = ParseEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weighted" | "point" | "points" => Ok(EngineKind::Weighted),
            "block" | "blocks" => Ok(EngineKind::Block),
            other => Err(ParseEngineError(other.to_string())),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EngineKind::Weighted => "weighted",
            EngineKind::Block => "block",
        })
    }
}

/// Configuration for building an engine.
///
/// Use `LifeConfig::default()` for defaults, `LifeConfig::from_env()` to
/// pick up `SPARSE_LIFE_ENGINE` / `SPARSE_LIFE_CAPACITY`, and the builder
/// methods to override individual knobs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LifeConfig {
    /// Engine selection. `None` means [`EngineKind::Block`].
    pub engine: Option<EngineKind>,
    /// Initial hash-table capacity: cells for the weighted engine, tiles for
    /// the block engine. `None` keeps each engine's own default.
    pub capacity: Option<usize>,
}

impl LifeConfig {
    /// Defaults overridden by whatever the environment sets. Values that do
    /// not parse are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENGINE_ENV).filter(|v| !v.trim().is_empty()) {
            match raw.parse::<EngineKind>() {
                Ok(kind) => config.engine = Some(kind),
                Err(err) => warn!(%err, "ignoring {ENGINE_ENV}"),
            }
        }
        if let Some(raw) = lookup(CAPACITY_ENV).filter(|v| !v.trim().is_empty()) {
            match raw.trim().parse::<usize>() {
                Ok(cap) => config.capacity = Some(cap),
                Err(err) => warn!(%err, value = %raw, "ignoring {CAPACITY_ENV}"),
            }
        }
        config
    }

    /// Force a specific engine.
    pub fn engine(mut self, kind: EngineKind) -> Self {
        self.engine = Some(kind);
        self
    }

    /// Set the initial hash-table capacity.
    pub fn capacity(mut self, cap: usize) -> Self {
        self.capacity = Some(cap);
        self
    }

    pub fn resolve_engine(&self) -> EngineKind {
        self.engine.unwrap_or_default()
    }

    /// Construct the configured engine.
    pub fn build(&self) -> Box<dyn Life> {
        match (self.resolve_engine(), self.capacity) {
            (EngineKind::Weighted, Some(cap)) => Box::new(WeightedLife::with_capacity(cap)),
            (EngineKind::Weighted, None) => Box::new(WeightedLife::new()),
            (EngineKind::Block, Some(cap)) => Box::new(BlockLife::with_capacity(cap)),
            (EngineKind::Block, None) => Box::new(BlockLife::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{CAPACITY_ENV, ENGINE_ENV, EngineKind, LifeConfig};

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn engine_names_parse() {
        assert_eq!("weighted".parse(), Ok(EngineKind::Weighted));
        assert_eq!(" Block ".parse(), Ok(EngineKind::Block));
        assert_eq!("points".parse(), Ok(EngineKind::Weighted));
        assert!("dense".parse::<EngineKind>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for kind in [EngineKind::Weighted, EngineKind::Block] {
            assert_eq!(kind.to_string().parse(), Ok(kind));
        }
    }

    #[test]
    fn defaults_to_block_engine() {
        let config = LifeConfig::default();
        assert_eq!(config.resolve_engine(), EngineKind::Block);
        assert_eq!(config.build().name(), "block");
    }

    #[test]
    fn env_values_are_applied() {
        let config =
            LifeConfig::from_lookup(lookup_from(&[(ENGINE_ENV, "weighted"), (CAPACITY_ENV, "4096")]));
        assert_eq!(config, LifeConfig::default().engine(EngineKind::Weighted).capacity(4096));
        assert_eq!(config.build().name(), "weighted");
    }

    #[test]
    fn bad_env_values_are_ignored() {
        let config =
            LifeConfig::from_lookup(lookup_from(&[(ENGINE_ENV, "hashlife"), (CAPACITY_ENV, "lots")]));
        assert_eq!(config, LifeConfig::default());
    }

    #[test]
    fn builder_overrides_env() {
        let config = LifeConfig::from_lookup(lookup_from(&[(ENGINE_ENV, "weighted")]))
            .engine(EngineKind::Block);
        assert_eq!(config.resolve_engine(), EngineKind::Block);
    }
}
