//! Fattest augmenting path by maximum-bottleneck search
//!
//! A Dijkstra-style label-setting search where the label of a vertex is the
//! largest bottleneck over all residual paths reaching it found so far. The
//! vertex with the largest label is settled next, so once the sink is
//! extracted its label is the widest bottleneck in the whole residual graph.
//!
//! Labels only grow during a search, so every heap update on a queued vertex
//! is a sift-up.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use crate::algorithm::traits::{AugmentingPath, AugmentingPathStrategy, PathSearch, SearchTree};
use crate::data_structures::graph::{Capacity, ResidualGraph, VertexId};
use crate::data_structures::priority_queue::{HeapError, KAryHeap};

/// Heap fan-out used when none is configured
pub const DEFAULT_ARITY: usize = 2;

/// Widest-path augmenting path selection backed by a k-ary heap
#[derive(Debug, Clone)]
pub struct FattestPath {
    arity: usize,
}

impl FattestPath {
    /// Create the strategy; fails if `arity < 2`
    pub fn new(arity: usize) -> Result<Self, HeapError> {
        if arity < 2 {
            return Err(HeapError::InvalidArity(arity));
        }
        Ok(Self { arity })
    }

    pub fn arity(&self) -> usize {
        self.arity
    }
}

impl Default for FattestPath {
    fn default() -> Self {
        Self {
            arity: DEFAULT_ARITY,
        }
    }
}

impl AugmentingPathStrategy for FattestPath {
    fn name(&self) -> &'static str {
        "fattest-path"
    }

    fn find_path(&mut self, graph: &ResidualGraph, source: VertexId, sink: VertexId) -> PathSearch {
        let bound = graph.vertex_bound();
        let mut tree = SearchTree::new(bound);
        let mut heap = KAryHeap::with_checked_arity(bound, self.arity);

        heap.update(source, Capacity::MAX);
        let mut vertices_visited = 1;
        let mut edges_visited = 0;
        let mut settled_sink = source == sink;

        while !settled_sink {
            let Ok(vertex) = heap.extract_max() else {
                break;
            };
            if vertex == sink {
                settled_sink = true;
                break;
            }

            let width = heap.priority(vertex);
            for &index in graph.outgoing(vertex) {
                let edge = graph.edge(index);
                let residual = edge.residual();
                if residual <= 0 {
                    continue;
                }

                let candidate = width.min(residual);
                if candidate <= heap.priority(edge.to) {
                    continue;
                }

                if edge.to != source && !tree.has_parent(edge.to) {
                    vertices_visited += 1;
                }
                edges_visited += 1;
                tree.set_parent(edge.to, index);
                heap.update(edge.to, candidate);
            }
        }

        let path = if settled_sink && source != sink {
            tree.trace(graph, source, sink)
                .map(|edges| AugmentingPath::with_bottleneck(edges, heap.priority(sink)))
        } else {
            None
        };

        PathSearch {
            path,
            vertices_visited,
            edges_visited,
        }
    }
}
