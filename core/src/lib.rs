//! FLOWSCOPE core: maximum flow and minimum cut with stepwise replay
//!
//! Builds a directed capacitated [`FlowGraph`], runs the Edmonds-Karp
//! augmenting-path method on a private copy of it, and returns the maximum
//! flow, the minimum cut (borrowed from the caller's graph) and a
//! [`FlowHistory`] of per-augmentation flow snapshots that a viewer can step
//! through.
//!
//! ```
//! use flowscope_core::{run, FlowGraph};
//!
//! let mut graph = FlowGraph::new();
//! graph.add_node("S", 0.0, 0.0)?;
//! graph.add_node("T", 100.0, 0.0)?;
//! graph.add_edge("S", "T", 7)?;
//!
//! let result = run(&graph, "S", "T")?;
//! assert_eq!(result.max_flow, 7);
//! assert_eq!(result.step_count(), 2);
//! # Ok::<(), flowscope_core::FlowError>(())
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod config;
pub mod data_structures;
pub mod execution;
pub mod validation;

pub use crate::algorithm::graph::{
    residual_arcs, run, Augmentation, Direction, EdmondsKarp, MaxFlowResult, MinCut, ResidualArc,
};
pub use crate::algorithm::traits::{
    Algorithm, Capacity, EdgeId, Flow, FlowError, FlowMetrics, GraphError, MaxFlowAlgorithm, NodeIndex,
};
pub use crate::config::{CoincidentEndpoints, SolverConfig};
pub use crate::data_structures::graph::{Edge, FlowGraph, GraphDocument, Node, Position};
pub use crate::execution::history::{FlowHistory, FlowSnapshot, HistoryError, StepCursor};
pub use crate::validation::correctness::{verify_result, InvariantViolation};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
