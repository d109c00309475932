//! Flow certificate verification
//!
//! Checks a computed flow against the constraints every feasible flow must
//! satisfy, then certifies optimality with the max-flow/min-cut theorem: the
//! flow is maximum exactly when the cut induced by residual reachability from
//! the source has the same capacity as the flow value.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use thiserror::Error;

use crate::algorithm::graph::max_flow::MinCut;
use crate::data_structures::graph::{Capacity, EdgeIndex, ResidualGraph, VertexId};

/// First constraint found violated by a flow
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowViolation {
    #[error("edge {edge} carries {flow} but its partner carries {partner}")]
    Antisymmetry {
        edge: EdgeIndex,
        flow: Capacity,
        partner: Capacity,
    },

    #[error("edge {edge} carries {flow} outside its capacity {capacity}")]
    CapacityExceeded {
        edge: EdgeIndex,
        flow: Capacity,
        capacity: Capacity,
    },

    #[error("vertex {vertex} has net outflow {net}")]
    Conservation { vertex: VertexId, net: Capacity },

    #[error("flow value {claimed} does not match source outflow {actual}")]
    ValueMismatch { claimed: Capacity, actual: Capacity },

    #[error("flow {flow} is below the residual cut capacity {cut}")]
    NotMaximal { flow: Capacity, cut: Capacity },
}

/// Check pairing antisymmetry and capacity bounds on every edge
pub fn check_edge_invariants(graph: &ResidualGraph) -> Result<(), FlowViolation> {
    for (index, edge) in graph.edges().iter().enumerate() {
        let partner = graph.edge(ResidualGraph::reverse_index(index)).flow;
        if edge.flow != -partner {
            return Err(FlowViolation::Antisymmetry {
                edge: index,
                flow: edge.flow,
                partner,
            });
        }

        // Forward edges keep flow within [0, capacity]; backward edges only
        // ever carry returned flow, so their flow is at most zero.
        let within = if index % 2 == 0 {
            0 <= edge.flow && edge.flow <= edge.capacity
        } else {
            edge.flow <= edge.capacity
        };
        if !within {
            return Err(FlowViolation::CapacityExceeded {
                edge: index,
                flow: edge.flow,
                capacity: edge.capacity,
            });
        }
    }
    Ok(())
}

/// Check that every vertex except the terminals has zero net outflow
pub fn check_conservation(
    graph: &ResidualGraph,
    source: VertexId,
    sink: VertexId,
) -> Result<(), FlowViolation> {
    for vertex in 0..graph.vertex_bound() {
        if vertex == source || vertex == sink {
            continue;
        }
        let net = graph.net_outflow(vertex);
        if net != 0 {
            return Err(FlowViolation::Conservation { vertex, net });
        }
    }
    Ok(())
}

/// Verify that the flow stored in `graph` is a maximum flow of value `claimed`.
///
/// Returns the minimum cut witnessing optimality.
pub fn verify_flow(
    graph: &ResidualGraph,
    source: VertexId,
    sink: VertexId,
    claimed: Capacity,
) -> Result<MinCut, FlowViolation> {
    check_edge_invariants(graph)?;
    check_conservation(graph, source, sink)?;

    let actual = graph.net_outflow(source);
    if actual != claimed {
        return Err(FlowViolation::ValueMismatch { claimed, actual });
    }

    let cut = MinCut::from_residual(graph, source);
    if cut.contains(sink) || cut.capacity != claimed {
        return Err(FlowViolation::NotMaximal {
            flow: claimed,
            cut: cut.capacity,
        });
    }
    Ok(cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> ResidualGraph {
        let mut graph = ResidualGraph::new(3);
        graph.add_edge(1, 2, 4);
        graph.add_edge(2, 3, 6);
        graph
    }

    #[test]
    fn test_accepts_maximum_flow() {
        let mut graph = chain();
        graph.augment(&[0, 2], 4);

        let cut = verify_flow(&graph, 1, 3, 4).unwrap();
        assert_eq!(cut.source_side, vec![1]);
        assert_eq!(cut.arcs, vec![0]);
        assert_eq!(cut.capacity, 4);
    }

    #[test]
    fn test_rejects_partial_flow() {
        let mut graph = chain();
        graph.augment(&[0, 2], 3);

        assert_eq!(
            verify_flow(&graph, 1, 3, 3),
            Err(FlowViolation::NotMaximal { flow: 3, cut: 0 })
        );
    }

    #[test]
    fn test_rejects_wrong_value() {
        let mut graph = chain();
        graph.augment(&[0, 2], 4);

        assert_eq!(
            verify_flow(&graph, 1, 3, 5),
            Err(FlowViolation::ValueMismatch { claimed: 5, actual: 4 })
        );
    }

    #[test]
    fn test_rejects_unbalanced_vertex() {
        let mut graph = chain();
        graph.augment(&[0], 2);

        assert_eq!(
            check_conservation(&graph, 1, 3),
            Err(FlowViolation::Conservation { vertex: 2, net: -2 })
        );
    }

    #[test]
    fn test_rejects_tampered_edges() {
        let mut graph = chain();
        graph.augment(&[0, 2], 4);
        let mut broken = graph.clone();
        broken.augment(&[0, 2], 1);

        assert_eq!(
            check_edge_invariants(&broken),
            Err(FlowViolation::CapacityExceeded {
                edge: 0,
                flow: 5,
                capacity: 4
            })
        );

        let mut value = serde_json::to_value(&graph).unwrap();
        value["edges"][1]["flow"] = serde_json::json!(-3);
        let tampered: ResidualGraph = serde_json::from_value(value).unwrap();
        assert_eq!(
            check_edge_invariants(&tampered),
            Err(FlowViolation::Antisymmetry {
                edge: 0,
                flow: 4,
                partner: -3
            })
        );
    }
}
