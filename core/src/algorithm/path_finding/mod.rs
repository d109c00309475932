//! Augmenting-path selection strategies
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod bfs;
pub mod dfs;
pub mod widest;

pub use self::bfs::ShortestPath;
pub use self::dfs::RandomizedPath;
pub use self::widest::FattestPath;
