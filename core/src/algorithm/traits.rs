//! Core trait definitions for augmenting-path search
//!
//! Every path-selection strategy answers the same question: given the current
//! residual graph, is there still a source-to-sink path with spare capacity,
//! and if so which one? The engine in [`crate::algorithm::graph::max_flow`]
//! is written against [`AugmentingPathStrategy`] alone and never inspects the
//! concrete strategy.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::data_structures::graph::{Capacity, EdgeIndex, ResidualGraph, VertexId};

/// Source-to-sink path through edges with positive residual capacity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentingPath {
    /// Edge indices ordered from source to sink
    pub edges: Vec<EdgeIndex>,
    /// Bottleneck already established by the search, if it tracks one
    pub known_bottleneck: Option<Capacity>,
}

impl AugmentingPath {
    pub fn new(edges: Vec<EdgeIndex>) -> Self {
        Self {
            edges,
            known_bottleneck: None,
        }
    }

    pub fn with_bottleneck(edges: Vec<EdgeIndex>, bottleneck: Capacity) -> Self {
        Self {
            edges,
            known_bottleneck: Some(bottleneck),
        }
    }

    /// Number of edges on the path
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Amount of flow the path can carry in `graph`.
    ///
    /// Uses the bottleneck recorded by the search when present, otherwise
    /// walks the path.
    pub fn bottleneck(&self, graph: &ResidualGraph) -> Capacity {
        self.known_bottleneck
            .or_else(|| graph.path_bottleneck(&self.edges))
            .unwrap_or(0)
    }

    /// Vertex sequence visited by the path, source first
    pub fn vertices(&self, graph: &ResidualGraph) -> Vec<VertexId> {
        let mut vertices = Vec::with_capacity(self.edges.len() + 1);
        if let Some(&first) = self.edges.first() {
            vertices.push(graph.edge(first).from);
        }
        vertices.extend(self.edges.iter().map(|&index| graph.edge(index).to));
        vertices
    }
}

/// Result of one path search, successful or not
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSearch {
    /// Path found, or `None` once the flow is maximal
    pub path: Option<AugmentingPath>,
    /// Vertices reached during the search, source included
    pub vertices_visited: u64,
    /// Edges traversed to reach new vertices
    pub edges_visited: u64,
}

impl PathSearch {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }
}

/// Path-selection strategy over a residual graph
///
/// # Contract
/// - A returned path starts at `source`, ends at `sink`, and every edge on
///   it has positive residual capacity.
/// - `path == None` means no augmenting path exists.
/// - The graph is only read; augmentation is the engine's job.
pub trait AugmentingPathStrategy: Debug {
    /// Display name
    fn name(&self) -> &'static str;

    /// Called once before the first search of an engine run.
    ///
    /// Strategies with internal state (such as a random stream) restore it
    /// here so reruns on a reset graph are reproducible.
    fn begin_run(&mut self) {}

    /// Search for one augmenting path from `source` to `sink`
    fn find_path(&mut self, graph: &ResidualGraph, source: VertexId, sink: VertexId) -> PathSearch;
}

/// Parent-edge tree built by a search, one slot per vertex
#[derive(Debug, Clone)]
pub(crate) struct SearchTree {
    parent_edge: Vec<Option<EdgeIndex>>,
}

impl SearchTree {
    pub(crate) fn new(vertex_bound: usize) -> Self {
        Self {
            parent_edge: vec![None; vertex_bound],
        }
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, vertex: VertexId, edge: EdgeIndex) {
        self.parent_edge[vertex] = Some(edge);
    }

    #[inline]
    pub(crate) fn has_parent(&self, vertex: VertexId) -> bool {
        self.parent_edge[vertex].is_some()
    }

    /// Edge indices from `source` to `sink`, or `None` if `sink` was not reached
    pub(crate) fn trace(
        &self,
        graph: &ResidualGraph,
        source: VertexId,
        sink: VertexId,
    ) -> Option<Vec<EdgeIndex>> {
        let mut edges = Vec::new();
        let mut vertex = sink;
        while vertex != source {
            let edge = self.parent_edge[vertex]?;
            edges.push(edge);
            vertex = graph.edge(edge).from;
        }
        edges.reverse();
        Some(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> ResidualGraph {
        let mut graph = ResidualGraph::new(3);
        graph.add_edge(0, 1, 5);
        graph.add_edge(1, 2, 3);
        graph.add_edge(2, 3, 8);
        graph
    }

    #[test]
    fn test_path_bottleneck_prefers_known_value() {
        let graph = chain();
        let walked = AugmentingPath::new(vec![0, 2, 4]);
        assert_eq!(walked.bottleneck(&graph), 3);
        assert_eq!(walked.len(), 3);

        let known = AugmentingPath::with_bottleneck(vec![0, 2, 4], 2);
        assert_eq!(known.bottleneck(&graph), 2);
    }

    #[test]
    fn test_path_vertices() {
        let graph = chain();
        let path = AugmentingPath::new(vec![0, 2, 4]);
        assert_eq!(path.vertices(&graph), vec![0, 1, 2, 3]);
        assert!(AugmentingPath::new(Vec::new()).vertices(&graph).is_empty());
    }

    #[test]
    fn test_search_tree_trace() {
        let graph = chain();
        let mut tree = SearchTree::new(graph.vertex_bound());
        tree.set_parent(1, 0);
        tree.set_parent(2, 2);

        assert!(tree.has_parent(2));
        assert_eq!(tree.trace(&graph, 0, 2), Some(vec![0, 2]));
        assert_eq!(tree.trace(&graph, 0, 3), None);
        assert_eq!(tree.trace(&graph, 0, 0), Some(Vec::new()));
    }
}
