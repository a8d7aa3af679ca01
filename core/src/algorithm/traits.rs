//! Core type definitions for the FLOWSCOPE flow engine
//!
//! This module establishes the identifiers, scalar types, error taxonomy and
//! algorithm traits shared by the graph model, the Edmonds-Karp solver and
//! the replay layer.
//!
//! # Key Design Principles
//! - Dense integer handles for nodes and edges, never reference identity
//! - Integral capacities and flows
//! - Typed errors propagated to the caller, never swallowed
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;
use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithm::graph::max_flow::MaxFlowResult;
use crate::algorithm::state::RunPhase;
use crate::data_structures::graph::FlowGraph;
use crate::execution::history::HistoryError;
use crate::validation::correctness::InvariantViolation;

/// Edge capacity. Negative values are rejected at construction.
pub type Capacity = i64;

/// Flow carried by an edge, always within `[0, capacity]`
pub type Flow = i64;

/// Dense node handle: the node's insertion position in its graph
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct NodeIndex(pub usize);

impl NodeIndex {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Stable edge identifier: the edge's insertion position.
///
/// A structural clone preserves every edge's position, so an `EdgeId`
/// names the same logical edge in the caller's graph and in the working
/// copy of a run. Parallel edges therefore stay distinguishable.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

impl EdgeId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Construction-time validation errors.
///
/// A failed mutation leaves the graph in its last valid state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("Duplicate node: {0}")]
    DuplicateNode(String),

    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Invalid capacity {capacity} on edge {from} -> {to}")]
    InvalidCapacity {
        from: String,
        to: String,
        capacity: Capacity,
    },

    #[error("Total capacity overflows adding {capacity} on edge {from} -> {to}")]
    CapacityOverflow {
        from: String,
        to: String,
        capacity: Capacity,
    },

    #[error("Flow vector holds {actual} values but the graph has {expected} edges")]
    FlowLengthMismatch { expected: usize, actual: usize },

    #[error("Flow {flow} on edge {edge} outside [0, {capacity}]")]
    FlowOutOfBounds {
        edge: EdgeId,
        flow: Flow,
        capacity: Capacity,
    },

    #[error("Graph document error: {0}")]
    Document(String),
}

/// Errors raised by a max-flow run or by solver configuration
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Endpoint not found: {0}")]
    EndpointNotFound(String),

    #[error("Source and sink are the same node: {0}")]
    CoincidentEndpoints(String),

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Invalid run transition: {from:?} -> {to:?}")]
    InvalidTransition { from: RunPhase, to: RunPhase },

    #[error("Cut edge {0} does not match the original graph")]
    CutMismatch(EdgeId),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

/// Run metrics collected by the solver
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowMetrics {
    /// Number of augmenting paths applied
    pub augmentations: usize,
    /// Nodes dequeued across all path searches
    pub nodes_explored: usize,
    /// Traversable arcs examined across all path searches
    pub arcs_scanned: usize,
    /// Wall-clock duration of the run
    pub execution_time_ms: f64,
}

/// Algorithm complexity information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmComplexity {
    pub time_complexity: String,
    pub space_complexity: String,
    pub iteration_bound: String,
}

/// Descriptive and configuration surface shared by every solver
pub trait Algorithm: Debug {
    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's category
    fn category(&self) -> &'static str;

    /// Returns a one-paragraph description
    fn description(&self) -> String;

    /// Returns asymptotic bounds
    fn complexity(&self) -> AlgorithmComplexity;

    /// Returns every parameter with its current value
    fn parameters(&self) -> HashMap<String, String>;

    /// Sets a parameter from its string form
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), FlowError>;

    /// Gets a parameter value
    fn get_parameter(&self, name: &str) -> Option<String>;
}

/// Maximum flow solver specialization
pub trait MaxFlowAlgorithm: Algorithm {
    /// Computes maximum flow and minimum cut from `source` to `sink`.
    ///
    /// The caller's graph is never mutated; cut edges in the result borrow
    /// from it.
    fn solve<'g>(
        &mut self,
        graph: &'g FlowGraph,
        source: &str,
        sink: &str,
    ) -> Result<MaxFlowResult<'g>, FlowError>;
}
