//! Minimum cut extraction from a terminal flow state
//!
//! Once no augmenting path remains, the nodes reachable from the source in
//! the residual graph form the source side of a minimum cut. The cut edges
//! are the edges of the caller's original graph leaving that side. By the
//! max-flow/min-cut theorem their capacities sum to the maximum flow.
//!
//! The working copy and the original are matched by stable `EdgeId`, with
//! endpoint node ids compared for equality, so parallel edges between the
//! same pair of nodes are resolved to the right original edge.

use std::collections::VecDeque;

use serde::Serialize;

use crate::algorithm::graph::residual::outgoing_arcs;
use crate::algorithm::traits::{Capacity, FlowError, NodeIndex};
use crate::data_structures::graph::{total_capacity, Edge, FlowGraph, Node};

/// Nodes reachable from `source` in the residual graph, as a membership
/// vector indexed by `NodeIndex`.
pub fn reachable_set(graph: &FlowGraph, source: NodeIndex) -> Vec<bool> {
    let mut reachable = vec![false; graph.node_count()];
    let mut queue = VecDeque::new();

    reachable[source.0] = true;
    queue.push_back(source);

    while let Some(node) = queue.pop_front() {
        for arc in outgoing_arcs(graph, node) {
            if !reachable[arc.to.0] {
                reachable[arc.to.0] = true;
                queue.push_back(arc.to);
            }
        }
    }

    reachable
}

/// Minimum cut resolved against the caller's graph
#[derive(Debug, Clone, Serialize)]
pub struct MinCut<'g> {
    /// Cut edges in edge order, borrowed from the original graph
    pub edges: Vec<&'g Edge>,
    /// Source-side nodes in node order, borrowed from the original graph
    pub source_side: Vec<&'g Node>,
    /// Total capacity of the cut edges
    pub capacity: Capacity,
}

impl<'g> MinCut<'g> {
    /// Cut with no edges and no source side
    pub fn empty() -> Self {
        Self {
            edges: Vec::new(),
            source_side: Vec::new(),
            capacity: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Derives the minimum cut from a terminal flow state
#[derive(Debug, Clone, Copy, Default)]
pub struct MinCutExtractor;

impl MinCutExtractor {
    /// Computes the cut of `terminal` (the run's working copy) and resolves
    /// it to edges of `original`.
    ///
    /// Fails with `CutMismatch` if the two graphs do not share ids and
    /// topology.
    pub fn extract<'g>(
        terminal: &FlowGraph,
        original: &'g FlowGraph,
        source: NodeIndex,
    ) -> Result<MinCut<'g>, FlowError> {
        let reachable = reachable_set(terminal, source);

        let mut edges = Vec::new();
        for edge in original.edges() {
            let id = edge.id();
            if id.0 >= terminal.edge_count() {
                return Err(FlowError::CutMismatch(id));
            }
            let working = terminal.edge(id);
            let same_endpoints = terminal.node(working.source()).id() == original.node(edge.source()).id()
                && terminal.node(working.destination()).id() == original.node(edge.destination()).id();
            if !same_endpoints {
                return Err(FlowError::CutMismatch(id));
            }

            if reachable[working.source().0] && !reachable[working.destination().0] {
                edges.push(edge);
            }
        }

        let source_side = original
            .nodes()
            .iter()
            .filter(|node| {
                terminal
                    .index_of(node.id())
                    .map_or(false, |index| reachable[index.0])
            })
            .collect();

        let capacity = total_capacity(edges.iter().copied());

        Ok(MinCut {
            edges,
            source_side,
            capacity,
        })
    }
}
