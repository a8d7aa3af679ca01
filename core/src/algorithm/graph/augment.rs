//! Flow augmentation along a discovered path
//!
//! The path is walked from sink back to source twice: once to compute the
//! bottleneck from the graph's current flow, once to apply it. Because the
//! search only traverses arcs with positive residual capacity the bottleneck
//! is strictly positive, so total flow strictly increases with every
//! augmentation.

use serde::{Deserialize, Serialize};

use crate::algorithm::graph::augmenting_path::AugmentingPath;
use crate::algorithm::graph::residual::{residual_capacity, Direction, ResidualArc};
use crate::algorithm::traits::Flow;
use crate::data_structures::graph::FlowGraph;

/// Record of one applied augmentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Augmentation {
    /// Index of the snapshot this augmentation produced
    pub step: usize,
    /// Amount of flow pushed along the path
    pub bottleneck: Flow,
    /// Path arcs in source-to-sink order; empty when path recording is off
    pub arcs: Vec<ResidualArc>,
}

/// Applies bottleneck flow along augmenting paths
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowAugmenter;

impl FlowAugmenter {
    /// Minimum residual capacity along `path` under the graph's current flow.
    ///
    /// Returns `0` for an empty path.
    pub fn bottleneck(graph: &FlowGraph, path: &AugmentingPath) -> Flow {
        path.arcs()
            .iter()
            .rev()
            .map(|arc| residual_capacity(graph.edge(arc.edge), arc.direction))
            .min()
            .unwrap_or(0)
    }

    /// Pushes `amount` along `path`: forward arcs gain flow, backward arcs
    /// lose it.
    pub fn apply(graph: &mut FlowGraph, path: &AugmentingPath, amount: Flow) {
        for arc in path.arcs().iter().rev() {
            let edge = graph.edge_mut(arc.edge);
            let flow = match arc.direction {
                Direction::Forward => edge.flow() + amount,
                Direction::Backward => edge.flow() - amount,
            };
            edge.set_flow(flow);
        }
    }

    /// Computes the bottleneck and applies it, returning the amount pushed
    pub fn augment(graph: &mut FlowGraph, path: &AugmentingPath) -> Flow {
        let bottleneck = Self::bottleneck(graph, path);
        debug_assert!(
            path.is_empty() || bottleneck > 0,
            "augmenting path with non-positive bottleneck"
        );
        Self::apply(graph, path, bottleneck);
        bottleneck
    }
}
