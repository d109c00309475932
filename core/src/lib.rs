//! flowbench core: augmenting-path maximum flow
//!
//! This crate computes maximum flows with three interchangeable
//! augmenting-path strategies and records what each one costs:
//!
//! - [`ShortestPath`]: breadth-first, fewest edges (Edmonds-Karp)
//! - [`RandomizedPath`]: depth-first with seeded random neighbor order
//! - [`FattestPath`]: maximum-bottleneck search over a [`KAryHeap`]
//!
//! ```
//! use flowbench_core::{max_flow, FattestPath, ResidualGraph};
//!
//! let mut graph = ResidualGraph::new(4);
//! graph.add_edge(1, 2, 10);
//! graph.add_edge(1, 3, 10);
//! graph.add_edge(2, 3, 2);
//! graph.add_edge(2, 4, 4);
//! graph.add_edge(3, 4, 9);
//!
//! let mut strategy = FattestPath::new(4).unwrap();
//! let result = max_flow(&mut graph, 1, 4, &mut strategy).unwrap();
//! assert_eq!(result.max_flow, 13);
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod config;
pub mod data_structures;
pub mod io;
pub mod validation;

pub use crate::algorithm::graph::max_flow::{
    max_flow, FlowError, FlowStatistics, MaxFlowEngine, MaxFlowResult, MinCut, StatisticsSummary,
};
pub use crate::algorithm::path_finding::{FattestPath, RandomizedPath, ShortestPath};
pub use crate::algorithm::traits::{AugmentingPath, AugmentingPathStrategy, PathSearch};
pub use crate::config::{ConfigError, SolverConfig, StrategyKind};
pub use crate::data_structures::graph::{Capacity, Edge, EdgeIndex, ResidualGraph, VertexId};
pub use crate::data_structures::priority_queue::{HeapError, KAryHeap};
pub use crate::io::dimacs::{DimacsError, DimacsInstance};
pub use crate::validation::correctness::{verify_flow, FlowViolation};
