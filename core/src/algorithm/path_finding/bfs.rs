//! Shortest augmenting path by breadth-first search
//!
//! Picking the augmenting path with the fewest edges bounds the number of
//! augmentations by O(VE) regardless of capacity values (Edmonds-Karp).
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::VecDeque;

use crate::algorithm::traits::{AugmentingPath, AugmentingPathStrategy, PathSearch, SearchTree};
use crate::data_structures::graph::{ResidualGraph, VertexId};

/// Breadth-first augmenting path selection
#[derive(Debug, Clone, Default)]
pub struct ShortestPath;

impl ShortestPath {
    pub fn new() -> Self {
        Self
    }
}

impl AugmentingPathStrategy for ShortestPath {
    fn name(&self) -> &'static str {
        "shortest-path"
    }

    fn find_path(&mut self, graph: &ResidualGraph, source: VertexId, sink: VertexId) -> PathSearch {
        let bound = graph.vertex_bound();
        let mut visited = vec![false; bound];
        let mut tree = SearchTree::new(bound);
        let mut queue = VecDeque::new();

        visited[source] = true;
        queue.push_back(source);

        let mut vertices_visited = 1;
        let mut edges_visited = 0;

        while !visited[sink] {
            let Some(vertex) = queue.pop_front() else {
                break;
            };

            for &index in graph.outgoing(vertex) {
                let edge = graph.edge(index);
                if visited[edge.to] || edge.residual() <= 0 {
                    continue;
                }

                visited[edge.to] = true;
                tree.set_parent(edge.to, index);
                queue.push_back(edge.to);
                vertices_visited += 1;
                edges_visited += 1;
            }
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

    #[test]
    fn test_finds_fewest_edge_path() {
        // 1 -> 2 -> 3 -> 4 competes with the direct arc 1 -> 4
        let mut graph = ResidualGraph::new(4);
        graph.add_edge(1, 2, 100);
        graph.add_edge(2, 3, 100);
        graph.add_edge(3, 4, 100);
        let direct = graph.add_edge(1, 4, 1);

        let search = ShortestPath::new().find_path(&graph, 1, 4);
        let path = search.path.unwrap();
        assert_eq!(path.edges, vec![direct]);
        assert_eq!(path.bottleneck(&graph), 1);
    }

    #[test]
    fn test_counts_discovered_vertices() {
        let mut graph = ResidualGraph::new(4);
        graph.add_edge(1, 2, 10);
        graph.add_edge(1, 3, 10);
        graph.add_edge(2, 3, 2);
        graph.add_edge(2, 4, 4);
        graph.add_edge(3, 4, 9);

        let search = ShortestPath::new().find_path(&graph, 1, 4);
        assert!(search.found());
        assert_eq!(search.vertices_visited, 4);
        assert_eq!(search.edges_visited, 3);
        assert_eq!(search.path.unwrap().edges, vec![0, 6]);
    }

    #[test]
    fn test_skips_saturated_edges() {
        let mut graph = ResidualGraph::new(3);
        let saturated = graph.add_edge(1, 3, 4);
        graph.add_edge(1, 2, 4);
        graph.add_edge(2, 3, 4);
        graph.augment(&[saturated], 4);

        let path = ShortestPath::new().find_path(&graph, 1, 3).path.unwrap();
        assert_eq!(path.vertices(&graph), vec![1, 2, 3]);
    }

    #[test]
    fn test_reports_no_path() {
        let mut graph = ResidualGraph::new(4);
        graph.add_edge(1, 2, 3);
        graph.add_edge(3, 4, 3);

        let search = ShortestPath::new().find_path(&graph, 1, 4);
        assert!(!search.found());
        assert_eq!(search.vertices_visited, 2);
        assert_eq!(search.edges_visited, 1);
    }
}
