//! Randomized depth-first augmenting path selection
//!
//! Each time the search enters a vertex it shuffles that vertex's outgoing
//! edges and tries them in the shuffled order, backtracking out of dead ends.
//! The random stream is seeded once per engine run, so identical inputs give
//! identical path sequences. There is no polynomial bound on the number of
//! augmentations; this strategy exists for empirical comparison.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::trace;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::algorithm::traits::{AugmentingPath, AugmentingPathStrategy, PathSearch, SearchTree};
use crate::data_structures::graph::{EdgeIndex, ResidualGraph, VertexId};

/// Seed used when none is configured
pub const DEFAULT_SEED: u64 = 42;

/// Vertex on the explicit DFS stack with its shuffled edge list
#[derive(Debug)]
struct Frame {
    edges: Vec<EdgeIndex>,
    next: usize,
}

/// Depth-first search with randomized neighbor order
#[derive(Debug, Clone)]
pub struct RandomizedPath {
    seed: u64,
    rng: StdRng,
}

impl RandomizedPath {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn enter(&mut self, graph: &ResidualGraph, vertex: VertexId) -> Frame {
        let mut edges = graph.outgoing(vertex).to_vec();
        edges.shuffle(&mut self.rng);
        Frame { edges, next: 0 }
    }
}

impl Default for RandomizedPath {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl AugmentingPathStrategy for RandomizedPath {
    fn name(&self) -> &'static str {
        "randomized-path"
    }

    fn begin_run(&mut self) {
        trace!("reseeding randomized search with {}", self.seed);
        self.rng = StdRng::seed_from_u64(self.seed);
    }

    fn find_path(&mut self, graph: &ResidualGraph, source: VertexId, sink: VertexId) -> PathSearch {
        let bound = graph.vertex_bound();
        let mut visited = vec![false; bound];
        let mut tree = SearchTree::new(bound);

        visited[source] = true;
        let mut vertices_visited = 1;
        let mut edges_visited = 0;

        let mut stack = Vec::new();
        if source != sink {
            let frame = self.enter(graph, source);
            stack.push(frame);
        }

        while let Some(frame) = stack.last_mut() {
            let Some(&index) = frame.edges.get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;

            let edge = graph.edge(index);
            if visited[edge.to] || edge.residual() <= 0 {
                continue;
            }

            visited[edge.to] = true;
            tree.set_parent(edge.to, index);
            vertices_visited += 1;
            edges_visited += 1;

            if edge.to == sink {
                break;
            }
            let frame = self.enter(graph, edge.to);
            stack.push(frame);
        }

        let path = visited[sink]
            .then(|| tree.trace(graph, source, sink))
            .flatten()
            .map(AugmentingPath::new);

        PathSearch {
            path,
            vertices_visited,
            edges_visited,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ladder() -> ResidualGraph {
        let mut graph = ResidualGraph::new(8);
        for rung in 0..3 {
            let left = 2 + rung * 2;
            graph.add_edge(1, left, 5);
            graph.add_edge(left, left + 1, 3);
            graph.add_edge(left + 1, 8, 4);
            graph.add_edge(left, 8, 1);
        }
        graph
    }

    fn assert_residual_path(graph: &ResidualGraph, path: &AugmentingPath, source: VertexId, sink: VertexId) {
        let vertices = path.vertices(graph);
        assert_eq!(vertices.first(), Some(&source));
        assert_eq!(vertices.last(), Some(&sink));
        assert!(path.edges.iter().all(|&index| graph.residual(index) > 0));
    }

    #[test]
    fn test_returns_valid_residual_path() {
        let graph = ladder();
        let mut strategy = RandomizedPath::new(7);
        let search = strategy.find_path(&graph, 1, 8);

        let path = search.path.unwrap();
        assert_residual_path(&graph, &path, 1, 8);
        assert!(search.vertices_visited as usize >= path.len() + 1);
        assert_eq!(search.vertices_visited, search.edges_visited + 1);
    }

    #[test]
    fn test_same_seed_same_paths() {
        let graph = ladder();
        let mut first = RandomizedPath::new(DEFAULT_SEED);
        let mut second = RandomizedPath::new(DEFAULT_SEED);

        for _ in 0..5 {
            assert_eq!(first.find_path(&graph, 1, 8), second.find_path(&graph, 1, 8));
        }
    }

    #[test]
    fn test_begin_run_restarts_stream() {
        let graph = ladder();
        let mut strategy = RandomizedPath::default();

        let before: Vec<PathSearch> = (0..4).map(|_| strategy.find_path(&graph, 1, 8)).collect();
        strategy.begin_run();
        let after: Vec<PathSearch> = (0..4).map(|_| strategy.find_path(&graph, 1, 8)).collect();

        assert_eq!(before, after);
        assert_eq!(strategy.seed(), DEFAULT_SEED);
    }

    #[test]
    fn test_backtracks_out_of_dead_ends() {
        // Every branch except the last one added dead-ends
        let mut graph = ResidualGraph::new(12);
        for dead_end in 2..11 {
            graph.add_edge(1, dead_end, 1);
        }
        graph.add_edge(1, 11, 1);
        graph.add_edge(11, 12, 1);

        for seed in 0..10 {
            let search = RandomizedPath::new(seed).find_path(&graph, 1, 12);
            let path = search.path.unwrap();
            assert_eq!(path.vertices(&graph), vec![1, 11, 12]);
        }
    }

    #[test]
    fn test_reports_no_path() {
        let mut graph = ResidualGraph::new(4);
        graph.add_edge(1, 2, 3);
        graph.add_edge(2, 1, 3);
        graph.add_edge(3, 4, 3);

        let search = RandomizedPath::default().find_path(&graph, 1, 4);
        assert!(!search.found());
        assert_eq!(search.vertices_visited, 2);
    }
}
