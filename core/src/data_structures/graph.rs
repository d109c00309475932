//! Residual graph with paired forward/backward arcs
//!
//! Every arc `u -> v` is stored as two consecutive edges: the forward edge at
//! an even index `2i` carrying the declared capacity, and the backward edge at
//! `2i + 1` with zero capacity. The partner of any edge is therefore `e ^ 1`,
//! and pushing flow along one edge is mirrored by pulling the same amount from
//! its partner, so `flow(e) == -flow(e ^ 1)` at all times.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

/// Vertex identifier
pub type VertexId = usize;

/// Index into the edge array of a [`ResidualGraph`]
pub type EdgeIndex = usize;

/// Capacity, flow and bottleneck values share one wide signed type.
///
/// A flow value never exceeds the total capacity leaving the source, so runs
/// require that total to fit in an `i64`; see
/// [`ResidualGraph::outgoing_capacity`].
pub type Capacity = i64;

/// Directed edge with residual capacity tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Tail vertex
    pub from: VertexId,
    /// Head vertex
    pub to: VertexId,
    /// Declared capacity (zero for backward edges)
    pub capacity: Capacity,
    /// Current flow; negative on backward edges carrying returned flow
    pub flow: Capacity,
}

impl Edge {
    /// Create an edge with no flow
    pub fn new(from: VertexId, to: VertexId, capacity: Capacity) -> Self {
        Self {
            from,
            to,
            capacity,
            flow: 0,
        }
    }

    /// Remaining capacity in the residual graph
    #[inline]
    pub fn residual(&self) -> Capacity {
        self.capacity - self.flow
    }
}

/// Capacitated directed multigraph in residual form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidualGraph {
    /// Declared vertex count `n`; ids run over `[0, n]`
    vertex_count: usize,
    /// Forward/backward edge pairs in insertion order
    edges: Vec<Edge>,
    /// Outgoing edge indices per vertex, in insertion order
    adjacency: Vec<Vec<EdgeIndex>>,
}

impl ResidualGraph {
    /// Create an empty graph declaring `vertex_count` vertices
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            edges: Vec::new(),
            adjacency: vec![Vec::new(); vertex_count + 1],
        }
    }

    /// Create an empty graph with room reserved for `arcs` edge pairs
    pub fn with_capacity(vertex_count: usize, arcs: usize) -> Self {
        let mut graph = Self::new(vertex_count);
        graph.edges.reserve(arcs.saturating_mul(2));
        graph
    }

    /// Append the arc `from -> to` and its zero-capacity partner.
    ///
    /// Returns the index of the forward edge, always even. The adjacency
    /// table grows to cover both endpoints.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, capacity: Capacity) -> EdgeIndex {
        debug_assert!(capacity >= 0, "arc capacity must be non-negative");

        let forward = self.edges.len();
        self.edges.push(Edge::new(from, to, capacity));
        self.edges.push(Edge::new(to, from, 0));

        let highest = from.max(to);
        if highest >= self.adjacency.len() {
            self.adjacency.resize_with(highest + 1, Vec::new);
        }
        self.adjacency[from].push(forward);
        self.adjacency[to].push(forward + 1);

        forward
    }

    /// Declared vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// One past the largest vertex id with an adjacency slot.
    ///
    /// Per-vertex search tables are sized with this, so arcs naming vertices
    /// above the declared count stay addressable.
    pub fn vertex_bound(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges, backward edges included
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of forward arcs
    pub fn arc_count(&self) -> usize {
        self.edges.len() / 2
    }

    pub fn edge(&self, index: EdgeIndex) -> &Edge {
        &self.edges[index]
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Forward arcs only, in insertion order
    pub fn arcs(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().step_by(2)
    }

    /// Edge indices leaving `vertex`, in insertion order
    pub fn outgoing(&self, vertex: VertexId) -> &[EdgeIndex] {
        self.adjacency
            .get(vertex)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Index of the partner edge
    #[inline]
    pub fn reverse_index(index: EdgeIndex) -> EdgeIndex {
        index ^ 1
    }

    #[inline]
    pub fn residual(&self, index: EdgeIndex) -> Capacity {
        self.edges[index].residual()
    }

    /// Smallest residual along `path`, or `None` for an empty path
    pub fn path_bottleneck(&self, path: &[EdgeIndex]) -> Option<Capacity> {
        path.iter().map(|&index| self.residual(index)).min()
    }

    /// Push `amount` units along every edge of `path`.
    ///
    /// The caller guarantees `amount` does not exceed the bottleneck of the
    /// path; this is not checked.
    pub fn augment(&mut self, path: &[EdgeIndex], amount: Capacity) {
        for &index in path {
            self.edges[index].flow += amount;
            self.edges[Self::reverse_index(index)].flow -= amount;
        }
    }

    /// Zero every flow, keeping capacities and topology
    pub fn reset_flow(&mut self) {
        for edge in &mut self.edges {
            edge.flow = 0;
        }
    }

    /// Flow leaving `vertex` minus flow entering it.
    ///
    /// Backward edges carry the negated flow of the arc they pair with, so
    /// summing over the outgoing list counts incoming flow with a minus sign.
    pub fn net_outflow(&self, vertex: VertexId) -> Capacity {
        self.outgoing(vertex)
            .iter()
            .map(|&index| self.edges[index].flow)
            .sum()
    }

    /// Sum of capacities of arcs leaving `vertex`; an upper bound on any flow.
    ///
    /// `None` when the sum does not fit in [`Capacity`].
    pub fn outgoing_capacity(&self, vertex: VertexId) -> Option<Capacity> {
        self.outgoing(vertex)
            .iter()
            .try_fold(0 as Capacity, |total, &index| total.checked_add(self.edges[index].capacity))
    }
}
