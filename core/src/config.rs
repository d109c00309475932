//! Solver configuration and strategy selection
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithm::path_finding::dfs::DEFAULT_SEED;
use crate::algorithm::path_finding::widest::DEFAULT_ARITY;
use crate::algorithm::path_finding::{FattestPath, RandomizedPath, ShortestPath};
use crate::algorithm::traits::AugmentingPathStrategy;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("heap fan-out must be at least 2, got {0}")]
    InvalidArity(usize),

    #[error("unknown strategy `{0}` (expected shortest, randomized or fattest)")]
    UnknownStrategy(String),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Augmenting-path strategy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Breadth-first shortest augmenting path (Edmonds-Karp)
    #[default]
    Shortest,
    /// Depth-first search with seeded random neighbor order
    Randomized,
    /// Maximum-bottleneck path through a k-ary heap
    Fattest,
}

impl StrategyKind {
    /// Every variant, in reporting order
    pub fn all() -> [StrategyKind; 3] {
        [Self::Shortest, Self::Randomized, Self::Fattest]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Shortest => "shortest",
            Self::Randomized => "randomized",
            Self::Fattest => "fattest",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "shortest" | "bfs" | "edmonds-karp" => Ok(Self::Shortest),
            "randomized" | "random" | "dfs" => Ok(Self::Randomized),
            "fattest" | "widest" => Ok(Self::Fattest),
            _ => Err(ConfigError::UnknownStrategy(value.to_string())),
        }
    }
}

/// Solver parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Strategy to run
    pub strategy: StrategyKind,
    /// Heap fan-out for the fattest-path strategy
    pub arity: usize,
    /// Seed for the randomized strategy
    pub seed: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            arity: DEFAULT_ARITY,
            seed: DEFAULT_SEED,
        }
    }
}

impl SolverConfig {
    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.arity < 2 {
            return Err(ConfigError::InvalidArity(self.arity));
        }
        Ok(())
    }

    /// Build the configured strategy
    pub fn build_strategy(&self) -> Result<Box<dyn AugmentingPathStrategy>, ConfigError> {
        self.build(self.strategy)
    }

    /// Build `kind` with this configuration's parameters
    pub fn build(&self, kind: StrategyKind) -> Result<Box<dyn AugmentingPathStrategy>, ConfigError> {
        self.validate()?;
        Ok(match kind {
            StrategyKind::Shortest => Box::new(ShortestPath::new()),
            StrategyKind::Randomized => Box::new(RandomizedPath::new(self.seed)),
            StrategyKind::Fattest => Box::new(
                FattestPath::new(self.arity).map_err(|_| ConfigError::InvalidArity(self.arity))?,
            ),
        })
    }
}
