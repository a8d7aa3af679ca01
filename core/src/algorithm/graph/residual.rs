//! Residual graph traversal rule
//!
//! The residual graph is never materialized during a run. Instead, arcs are
//! derived on demand from the current flow: an edge `u -> v` yields a
//! forward arc `u -> v` while `capacity - flow > 0` and a backward arc
//! `v -> u` while `flow > 0`.

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{Capacity, EdgeId, NodeIndex};
use crate::data_structures::graph::{Edge, FlowGraph};

/// Direction in which an edge is traversed in the residual graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Along the edge, consuming spare capacity
    Forward,
    /// Against the edge, cancelling existing flow
    Backward,
}

/// Arc of the residual graph backed by an edge of the flow graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidualArc {
    pub edge: EdgeId,
    pub from: NodeIndex,
    pub to: NodeIndex,
    pub direction: Direction,
    /// Residual capacity when the arc was observed
    pub residual: Capacity,
}

/// Residual capacity of `edge` in the given direction
#[inline]
pub fn residual_capacity(edge: &Edge, direction: Direction) -> Capacity {
    match direction {
        Direction::Forward => edge.capacity() - edge.flow(),
        Direction::Backward => edge.flow(),
    }
}

/// Residual arc leaving `node` through edge `id`, if traversable.
///
/// When `node` is the edge's source only the forward rule applies;
/// otherwise the backward rule applies when `node` is its destination.
pub fn arc_from(graph: &FlowGraph, node: NodeIndex, id: EdgeId) -> Option<ResidualArc> {
    let edge = graph.edge(id);
    let (to, direction) = if edge.source() == node {
        (edge.destination(), Direction::Forward)
    } else if edge.destination() == node {
        (edge.source(), Direction::Backward)
    } else {
        return None;
    };

    let residual = residual_capacity(edge, direction);
    (residual > 0).then_some(ResidualArc {
        edge: id,
        from: node,
        to,
        direction,
        residual,
    })
}

/// Traversable residual arcs leaving `node`, in incidence order
pub fn outgoing_arcs(graph: &FlowGraph, node: NodeIndex) -> impl Iterator<Item = ResidualArc> + '_ {
    graph
        .incident(node)
        .iter()
        .filter_map(move |&id| arc_from(graph, node, id))
}

/// Every arc of the residual graph, in edge order.
///
/// Each edge contributes its forward arc (if any) followed by its backward
/// arc (if any). This is the "residual" view of a flow state.
pub fn residual_arcs(graph: &FlowGraph) -> Vec<ResidualArc> {
    let mut arcs = Vec::with_capacity(graph.edge_count());
    for edge in graph.edges() {
        for direction in [Direction::Forward, Direction::Backward] {
            let residual = residual_capacity(edge, direction);
            if residual > 0 {
                let (from, to) = match direction {
                    Direction::Forward => (edge.source(), edge.destination()),
                    Direction::Backward => (edge.destination(), edge.source()),
                };
                arcs.push(ResidualArc {
                    edge: edge.id(),
                    from,
                    to,
                    direction,
                    residual,
                });
            }
        }
    }
    arcs
}
