//! Augmenting-path maximum flow engine
//!
//! The engine repeatedly asks a strategy for an augmenting path, pushes the
//! path's bottleneck along it, and stops once no path remains. It records the
//! search cost of every iteration so strategies can be compared on the same
//! instance.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::VecDeque;

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::AugmentingPathStrategy;
use crate::data_structures::graph::{Capacity, EdgeIndex, ResidualGraph, VertexId};

/// Engine precondition failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("vertex {0} is outside the graph")]
    InvalidVertex(VertexId),

    #[error("source and sink are the same vertex {0}")]
    SourceIsSink(VertexId),

    #[error("capacity leaving source {0} exceeds the representable flow range")]
    CapacityOverflow(VertexId),
}

/// Per-run search cost counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowStatistics {
    /// Number of augmentations performed
    pub iterations: u64,
    /// Vertices visited summed over all successful searches
    pub vertices_visited: u64,
    /// Edges visited summed over all successful searches
    pub edges_visited: u64,
    /// Vertices visited by each successful search
    pub iteration_vertices: Vec<u64>,
    /// Edges visited by each successful search
    pub iteration_edges: Vec<u64>,
    /// Edge count of each augmenting path
    pub path_lengths: Vec<u64>,
    /// Flow pushed by each augmentation
    pub path_flows: Vec<Capacity>,
}

impl FlowStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one augmentation
    pub fn record_iteration(&mut self, vertices: u64, edges: u64, path_length: u64, flow: Capacity) {
        self.iterations += 1;
        self.vertices_visited += vertices;
        self.edges_visited += edges;
        self.iteration_vertices.push(vertices);
        self.iteration_edges.push(edges);
        self.path_lengths.push(path_length);
        self.path_flows.push(flow);
    }

    /// Averages over all iterations
    pub fn summary(&self) -> StatisticsSummary {
        let per_iteration = |total: u64| {
            if self.iterations == 0 {
                0.0
            } else {
                total as f64 / self.iterations as f64
            }
        };

        StatisticsSummary {
            iterations: self.iterations,
            vertices_visited: self.vertices_visited,
            edges_visited: self.edges_visited,
            average_vertices: per_iteration(self.vertices_visited),
            average_edges: per_iteration(self.edges_visited),
            average_path_length: per_iteration(self.path_lengths.iter().sum()),
            longest_path: self.path_lengths.iter().copied().max().unwrap_or(0),
        }
    }
}

/// Aggregate view of [`FlowStatistics`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    pub iterations: u64,
    pub vertices_visited: u64,
    pub edges_visited: u64,
    pub average_vertices: f64,
    pub average_edges: f64,
    pub average_path_length: f64,
    pub longest_path: u64,
}

/// Outcome of one engine run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxFlowResult {
    /// Strategy display name
    pub strategy: String,
    /// Total flow from source to sink
    pub max_flow: Capacity,
    /// Search cost counters
    pub statistics: FlowStatistics,
}

/// Source side of a minimum cut read off the final residual graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinCut {
    /// Vertices reachable from the source through positive residual edges
    pub source_side: Vec<VertexId>,
    /// Forward arcs crossing from the source side to the sink side
    pub arcs: Vec<EdgeIndex>,
    /// Total capacity of the crossing arcs
    pub capacity: Capacity,
}

impl MinCut {
    /// Compute the cut induced by residual reachability from `source`
    pub fn from_residual(graph: &ResidualGraph, source: VertexId) -> Self {
        let reachable = residual_reachable(graph, source);

        let arcs: Vec<EdgeIndex> = (0..graph.edge_count())
            .step_by(2)
            .filter(|&index| {
                let edge = graph.edge(index);
                reachable[edge.from] && !reachable[edge.to]
            })
            .collect();
        let capacity = arcs.iter().map(|&index| graph.edge(index).capacity).sum();
        let source_side = reachable
            .iter()
            .enumerate()
            .filter_map(|(vertex, &inside)| inside.then_some(vertex))
            .collect();

        Self {
            source_side,
            arcs,
            capacity,
        }
    }

    pub fn contains(&self, vertex: VertexId) -> bool {
        self.source_side.binary_search(&vertex).is_ok()
    }
}

/// Membership table of vertices reachable from `source` in the residual graph
pub(crate) fn residual_reachable(graph: &ResidualGraph, source: VertexId) -> Vec<bool> {
    let mut reachable = vec![false; graph.vertex_bound()];
    let mut queue = VecDeque::from([source]);
    reachable[source] = true;

    while let Some(vertex) = queue.pop_front() {
        for &index in graph.outgoing(vertex) {
            let edge = graph.edge(index);
            if !reachable[edge.to] && edge.residual() > 0 {
                reachable[edge.to] = true;
                queue.push_back(edge.to);
            }
        }
    }
    reachable
}

/// Strategy-agnostic augmenting-path driver
#[derive(Debug, Clone, Default)]
pub struct MaxFlowEngine {
    max_flow: Capacity,
    statistics: FlowStatistics,
}

impl MaxFlowEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flow accumulated so far in the current run
    pub fn max_flow(&self) -> Capacity {
        self.max_flow
    }

    pub fn statistics(&self) -> &FlowStatistics {
        &self.statistics
    }

    /// Check the terminals and start a fresh run
    pub fn begin<S>(
        &mut self,
        graph: &ResidualGraph,
        source: VertexId,
        sink: VertexId,
        strategy: &mut S,
    ) -> Result<(), FlowError>
    where
        S: AugmentingPathStrategy + ?Sized,
    {
        for vertex in [source, sink] {
            if vertex >= graph.vertex_bound() {
                return Err(FlowError::InvalidVertex(vertex));
            }
        }
        if source == sink {
            return Err(FlowError::SourceIsSink(source));
        }
        let bound = graph
            .outgoing_capacity(source)
            .ok_or(FlowError::CapacityOverflow(source))?;

        self.max_flow = 0;
        self.statistics = FlowStatistics::new();
        strategy.begin_run();
        debug!(
            "{}: starting run from {} to {} over {} arcs, flow bounded by {}",
            strategy.name(),
            source,
            sink,
            graph.arc_count(),
            bound
        );
        Ok(())
    }

    /// Perform one augmentation.
    ///
    /// Returns the amount pushed, or `None` when no augmenting path remains.
    /// Must follow a successful [`begin`](Self::begin) with the same terminals.
    pub fn augment_once<S>(
        &mut self,
        graph: &mut ResidualGraph,
        source: VertexId,
        sink: VertexId,
        strategy: &mut S,
    ) -> Option<Capacity>
    where
        S: AugmentingPathStrategy + ?Sized,
    {
        let search = strategy.find_path(graph, source, sink);
        let path = search.path?;

        let path_flow = path.bottleneck(graph);
        graph.augment(&path.edges, path_flow);
        self.max_flow += path_flow;
        self.statistics.record_iteration(
            search.vertices_visited,
            search.edges_visited,
            path.len() as u64,
            path_flow,
        );

        trace!(
            "{}: iteration {} pushed {} along {} edges ({} vertices, {} edges visited)",
            strategy.name(),
            self.statistics.iterations,
            path_flow,
            path.len(),
            search.vertices_visited,
            search.edges_visited
        );
        Some(path_flow)
    }

    /// Compute a maximum flow from `source` to `sink`, mutating `graph` in place
    pub fn run<S>(
        &mut self,
        graph: &mut ResidualGraph,
        source: VertexId,
        sink: VertexId,
        strategy: &mut S,
    ) -> Result<MaxFlowResult, FlowError>
    where
        S: AugmentingPathStrategy + ?Sized,
    {
        self.begin(graph, source, sink, strategy)?;
        while self.augment_once(graph, source, sink, strategy).is_some() {}

        info!(
            "{}: maximum flow {} after {} iterations",
            strategy.name(),
            self.max_flow,
            self.statistics.iterations
        );

        Ok(MaxFlowResult {
            strategy: strategy.name().to_string(),
            max_flow: self.max_flow,
            statistics: self.statistics.clone(),
        })
    }
}

/// Run `strategy` on `graph` with a fresh engine
pub fn max_flow<S>(
    graph: &mut ResidualGraph,
    source: VertexId,
    sink: VertexId,
    strategy: &mut S,
) -> Result<MaxFlowResult, FlowError>
where
    S: AugmentingPathStrategy + ?Sized,
{
    MaxFlowEngine::new().run(graph, source, sink, strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::path_finding::{FattestPath, RandomizedPath, ShortestPath};
    use crate::validation::correctness::{check_edge_invariants, verify_flow};
    use proptest::prelude::*;

    fn diamond() -> ResidualGraph {
        let mut graph = ResidualGraph::new(4);
        graph.add_edge(1, 2, 10);
        graph.add_edge(1, 3, 10);
        graph.add_edge(2, 3, 2);
        graph.add_edge(2, 4, 4);
        graph.add_edge(3, 4, 9);
        graph
    }

    fn strategies() -> Vec<Box<dyn AugmentingPathStrategy>> {
        vec![
            Box::new(ShortestPath::new()),
            Box::new(RandomizedPath::default()),
            Box::new(FattestPath::new(2).unwrap()),
            Box::new(FattestPath::new(4).unwrap()),
        ]
    }

    #[test]
    fn test_diamond_under_every_strategy() {
        for mut strategy in strategies() {
            let mut graph = diamond();
            let result = max_flow(&mut graph, 1, 4, strategy.as_mut()).unwrap();

            assert_eq!(result.max_flow, 13, "{}", result.strategy);
            assert_eq!(graph.net_outflow(1), 13);
            assert!(verify_flow(&graph, 1, 4, result.max_flow).is_ok());
        }
    }

    #[test]
    fn test_single_edge_takes_one_iteration() {
        for mut strategy in strategies() {
            let mut graph = ResidualGraph::new(2);
            graph.add_edge(1, 2, 5);

            let result = max_flow(&mut graph, 1, 2, strategy.as_mut()).unwrap();
            assert_eq!(result.max_flow, 5);
            assert_eq!(result.statistics.iterations, 1);
            assert_eq!(result.statistics.path_lengths, vec![1]);
            assert_eq!(result.statistics.path_flows, vec![5]);
        }
    }

    #[test]
    fn test_disconnected_terminals() {
        for mut strategy in strategies() {
            let mut graph = ResidualGraph::new(4);
            graph.add_edge(1, 2, 7);
            graph.add_edge(3, 4, 7);

            assert!(!strategy.find_path(&graph, 1, 4).found());
            let result = max_flow(&mut graph, 1, 4, strategy.as_mut()).unwrap();
            assert_eq!(result.max_flow, 0);
            assert_eq!(result.statistics, FlowStatistics::new());
        }
    }

    #[test]
    fn test_rejects_bad_terminals() {
        let mut graph = diamond();
        let mut strategy = ShortestPath::new();
        assert_eq!(
            max_flow(&mut graph, 1, 9, &mut strategy),
            Err(FlowError::InvalidVertex(9))
        );
        assert_eq!(
            max_flow(&mut graph, 2, 2, &mut strategy),
            Err(FlowError::SourceIsSink(2))
        );
    }

    #[test]
    fn test_rejects_source_capacity_overflow() {
        let mut graph = ResidualGraph::new(2);
        graph.add_edge(1, 2, Capacity::MAX);
        graph.add_edge(1, 2, Capacity::MAX);
        assert_eq!(
            max_flow(&mut graph, 1, 2, &mut ShortestPath::new()),
            Err(FlowError::CapacityOverflow(1))
        );

        let mut graph = ResidualGraph::new(2);
        graph.add_edge(1, 2, Capacity::MAX);
        let result = max_flow(&mut graph, 1, 2, &mut FattestPath::default()).unwrap();
        assert_eq!(result.max_flow, Capacity::MAX);
    }

    #[test]
    fn test_invariants_hold_after_every_augmentation() {
        for mut strategy in strategies() {
            let mut graph = diamond();
            let mut engine = MaxFlowEngine::new();
            engine.begin(&graph, 1, 4, strategy.as_mut()).unwrap();

            while let Some(pushed) = engine.augment_once(&mut graph, 1, 4, strategy.as_mut()) {
                assert!(pushed > 0);
                check_edge_invariants(&graph).unwrap();
                for vertex in [2, 3] {
                    assert_eq!(graph.net_outflow(vertex), 0);
                }
                assert_eq!(graph.net_outflow(1), engine.max_flow());
            }
            assert_eq!(engine.max_flow(), 13);
        }
    }

    #[test]
    fn test_reset_flow_reproduces_result() {
        for mut strategy in strategies() {
            let mut graph = diamond();
            let first = max_flow(&mut graph, 1, 4, strategy.as_mut()).unwrap();
            graph.reset_flow();
            let second = max_flow(&mut graph, 1, 4, strategy.as_mut()).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_randomized_runs_are_reproducible() {
        let graph = layered(6, 5, 11);
        let mut strategy = RandomizedPath::new(1234);

        let mut first_graph = graph.clone();
        let first = max_flow(&mut first_graph, 0, 31, &mut strategy).unwrap();
        let mut second_graph = graph.clone();
        let second = max_flow(&mut second_graph, 0, 31, &mut strategy).unwrap();

        assert_eq!(first.statistics, second.statistics);
        assert_eq!(first_graph, second_graph);
    }

    #[test]
    fn test_min_cut_matches_flow() {
        let mut graph = diamond();
        let result = max_flow(&mut graph, 1, 4, &mut FattestPath::default()).unwrap();
        let cut = MinCut::from_residual(&graph, 1);

        assert_eq!(cut.capacity, result.max_flow);
        assert!(cut.contains(1));
        assert!(!cut.contains(4));
        assert_eq!(cut.arcs.len(), 2);
    }

    #[test]
    fn test_summary_averages() {
        let mut statistics = FlowStatistics::new();
        assert_eq!(statistics.summary().average_path_length, 0.0);

        statistics.record_iteration(4, 3, 2, 9);
        statistics.record_iteration(6, 5, 4, 4);
        let summary = statistics.summary();
        assert_eq!(summary.iterations, 2);
        assert_eq!(summary.vertices_visited, 10);
        assert_eq!(summary.average_vertices, 5.0);
        assert_eq!(summary.average_edges, 4.0);
        assert_eq!(summary.average_path_length, 3.0);
        assert_eq!(summary.longest_path, 4);
    }

    /// Source 0, sink `layers * width + 1`, full bipartite links between layers
    fn layered(layers: usize, width: usize, seed: u64) -> ResidualGraph {
        let sink = layers * width + 1;
        let mut graph = ResidualGraph::new(sink);
        let mut capacity = seed as i64;
        let mut next_capacity = || {
            capacity = (capacity * 1103515245 + 12345).rem_euclid(1 << 31);
            1 + capacity % 20
        };

        for column in 0..width {
            graph.add_edge(0, 1 + column, next_capacity());
        }
        for layer in 0..layers - 1 {
            for from in 0..width {
                for to in 0..width {
                    let u = 1 + layer * width + from;
                    let v = 1 + (layer + 1) * width + to;
                    graph.add_edge(u, v, next_capacity());
                }
            }
        }
        for column in 0..width {
            graph.add_edge(1 + (layers - 1) * width + column, sink, next_capacity());
        }
        graph
    }

    fn arbitrary_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize, i64)>)> {
        (3usize..10).prop_flat_map(|n| {
            let arc = (1..=n, 1..=n, 0i64..50);
            (Just(n), prop::collection::vec(arc, 0..40))
        })
    }

    proptest! {
        #[test]
        fn test_strategies_agree_on_flow_value((n, arcs) in arbitrary_graph()) {
            let mut graph = ResidualGraph::new(n);
            for &(u, v, capacity) in &arcs {
                graph.add_edge(u, v, capacity);
            }

            let mut values = Vec::new();
            for mut strategy in strategies() {
                let result = max_flow(&mut graph, 1, n, strategy.as_mut()).unwrap();
                prop_assert!(verify_flow(&graph, 1, n, result.max_flow).is_ok());
                prop_assert_eq!(MinCut::from_residual(&graph, 1).capacity, result.max_flow);
                values.push(result.max_flow);
                graph.reset_flow();
            }
            prop_assert!(values.windows(2).all(|pair| pair[0] == pair[1]));
        }
    }
}
