//! Breadth-first augmenting path search
//!
//! Searches the residual graph induced by the current flow for a shortest
//! (fewest arcs) source-to-sink path. Using BFS rather than DFS is what
//! bounds Edmonds-Karp to `O(V·E)` augmentations of `O(E)` each.
//!
//! Neighbors are explored in incidence order, which follows edge insertion
//! order, so identical input always yields the identical path.

use std::collections::VecDeque;

use log::trace;

use crate::algorithm::graph::residual::{outgoing_arcs, ResidualArc};
use crate::algorithm::traits::{Capacity, NodeIndex};
use crate::data_structures::graph::FlowGraph;

/// Augmenting path as residual arcs in source-to-sink order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentingPath {
    arcs: Vec<ResidualArc>,
}

impl AugmentingPath {
    pub fn arcs(&self) -> &[ResidualArc] {
        &self.arcs
    }

    pub fn into_arcs(self) -> Vec<ResidualArc> {
        self.arcs
    }

    /// Number of arcs on the path
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Nodes visited by the path, source first
    pub fn nodes(&self) -> Vec<NodeIndex> {
        let mut nodes = Vec::with_capacity(self.arcs.len() + 1);
        if let Some(first) = self.arcs.first() {
            nodes.push(first.from);
        }
        nodes.extend(self.arcs.iter().map(|arc| arc.to));
        nodes
    }

    /// Smallest residual capacity observed during the search
    pub fn observed_bottleneck(&self) -> Option<Capacity> {
        self.arcs.iter().map(|arc| arc.residual).min()
    }

    /// Renders the path as `S -> A -> T` using node ids of `graph`
    pub fn describe(&self, graph: &FlowGraph) -> String {
        self.nodes()
            .into_iter()
            .map(|index| graph.node(index).id())
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

/// Reusable BFS state for repeated path searches on one graph.
///
/// Per-node bookkeeping is keyed by `NodeIndex`: for every node reached,
/// the arc through which it was first discovered.
#[derive(Debug, Clone, Default)]
pub struct AugmentingPathFinder {
    /// Discovery arc per node
    parents: Vec<Option<ResidualArc>>,
    visited: Vec<bool>,
    queue: VecDeque<NodeIndex>,
    nodes_explored: usize,
    arcs_scanned: usize,
}

impl AugmentingPathFinder {
    pub fn new(node_count: usize) -> Self {
        Self {
            parents: vec![None; node_count],
            visited: vec![false; node_count],
            queue: VecDeque::with_capacity(node_count),
            nodes_explored: 0,
            arcs_scanned: 0,
        }
    }

    /// Finds a shortest augmenting path from `source` to `sink`.
    ///
    /// Returns `None` when the sink is unreachable in the residual graph.
    /// When `source == sink` the returned path is empty.
    pub fn find(&mut self, graph: &FlowGraph, source: NodeIndex, sink: NodeIndex) -> Option<AugmentingPath> {
        self.reset(graph.node_count());

        self.visited[source.0] = true;
        self.queue.push_back(source);

        while let Some(node) = self.queue.pop_front() {
            self.nodes_explored += 1;
            if node == sink {
                break;
            }

            for arc in outgoing_arcs(graph, node) {
                self.arcs_scanned += 1;
                if self.visited[arc.to.0] {
                    continue;
                }
                trace!(
                    "bfs: {} -> {} via {} ({:?}, residual {})",
                    graph.node(arc.from).id(),
                    graph.node(arc.to).id(),
                    arc.edge,
                    arc.direction,
                    arc.residual
                );
                self.visited[arc.to.0] = true;
                self.parents[arc.to.0] = Some(arc);
                self.queue.push_back(arc.to);
            }
        }

        if !self.visited[sink.0] {
            return None;
        }

        let mut arcs = Vec::new();
        let mut current = sink;
        while current != source {
            let arc = self.parents[current.0]?;
            arcs.push(arc);
            current = arc.from;
        }
        arcs.reverse();

        Some(AugmentingPath { arcs })
    }

    /// Nodes dequeued across every search so far
    pub fn nodes_explored(&self) -> usize {
        self.nodes_explored
    }

    /// Traversable arcs examined across every search so far
    pub fn arcs_scanned(&self) -> usize {
        self.arcs_scanned
    }

    fn reset(&mut self, node_count: usize) {
        self.parents.clear();
        self.parents.resize(node_count, None);
        self.visited.clear();
        self.visited.resize(node_count, false);
        self.queue.clear();
    }
}
