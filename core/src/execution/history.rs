//! Flow history management for stepwise replay
//!
//! A run records one snapshot before the first augmentation and one after
//! each augmentation. Snapshots are compact flow vectors rather than graph
//! clones.
//!
//! # Alignment Contract
//! Every snapshot holds exactly one flow value per edge of the caller's
//! graph, in the graph's edge order: `flows[i]` is the flow on `EdgeId(i)`.
//! The edge list never changes during a run, and `record` rejects any
//! vector whose length differs from the history's edge count.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithm::traits::{EdgeId, Flow, GraphError};
use crate::data_structures::graph::FlowGraph;

/// Error types for flow history operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("Invalid step {step}: history holds {len} snapshots")]
    InvalidStep { step: usize, len: usize },

    #[error("Snapshot misaligned: expected {expected} flows, got {actual}")]
    Misaligned { expected: usize, actual: usize },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Flow state after a given number of augmentations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowSnapshot {
    /// Number of augmentations applied
    pub step: usize,
    /// Accumulated flow value at this step
    pub total_flow: Flow,
    /// Per-edge flow aligned to edge order
    pub flows: Vec<Flow>,
}

impl FlowSnapshot {
    /// Flow on `edge` at this step
    pub fn flow(&self, edge: EdgeId) -> Option<Flow> {
        self.flows.get(edge.0).copied()
    }
}

/// Ordered flow snapshots of one run
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlowHistory {
    edge_count: usize,
    snapshots: Vec<FlowSnapshot>,
}

impl FlowHistory {
    /// Creates an empty history for graphs with `edge_count` edges
    pub fn new(edge_count: usize) -> Self {
        Self {
            edge_count,
            snapshots: Vec::new(),
        }
    }

    /// Captures the current flow of `graph` as the next snapshot and
    /// returns its step index.
    pub fn record(&mut self, graph: &FlowGraph, total_flow: Flow) -> Result<usize, HistoryError> {
        let flows = graph.flows();
        if flows.len() != self.edge_count {
            return Err(HistoryError::Misaligned {
                expected: self.edge_count,
                actual: flows.len(),
            });
        }

        let step = self.snapshots.len();
        self.snapshots.push(FlowSnapshot {
            step,
            total_flow,
            flows,
        });
        Ok(step)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Number of flow values in every snapshot
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn get(&self, step: usize) -> Option<&FlowSnapshot> {
        self.snapshots.get(step)
    }

    /// The all-zero state recorded before the first augmentation
    pub fn initial(&self) -> Option<&FlowSnapshot> {
        self.snapshots.first()
    }

    /// The state after the last augmentation
    pub fn terminal(&self) -> Option<&FlowSnapshot> {
        self.snapshots.last()
    }

    pub fn snapshots(&self) -> &[FlowSnapshot] {
        &self.snapshots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FlowSnapshot> {
        self.snapshots.iter()
    }

    /// Flow on `edge` at `step`
    pub fn flow_at(&self, step: usize, edge: EdgeId) -> Option<Flow> {
        self.get(step).and_then(|snapshot| snapshot.flow(edge))
    }

    /// Accumulated flow value of every step
    pub fn totals(&self) -> Vec<Flow> {
        self.snapshots.iter().map(|snapshot| snapshot.total_flow).collect()
    }

    /// Rebuilds a full graph carrying the flows of `step`.
    ///
    /// `original` must be the graph the run was computed on.
    pub fn materialize(&self, step: usize, original: &FlowGraph) -> Result<FlowGraph, HistoryError> {
        let snapshot = self.get(step).ok_or(HistoryError::InvalidStep {
            step,
            len: self.len(),
        })?;
        let mut graph = original.structural_clone();
        graph.apply_flows(&snapshot.flows)?;
        Ok(graph)
    }

    /// Playback cursor positioned on the initial state, or `None` for an
    /// empty history
    pub fn cursor(&self) -> Option<StepCursor<'_>> {
        (!self.is_empty()).then(|| StepCursor {
            history: self,
            position: 0,
        })
    }
}

impl<'a> IntoIterator for &'a FlowHistory {
    type Item = &'a FlowSnapshot;
    type IntoIter = std::slice::Iter<'a, FlowSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

/// Bidirectional playback over a non-empty history
#[derive(Debug, Clone)]
pub struct StepCursor<'h> {
    history: &'h FlowHistory,
    position: usize,
}

impl<'h> StepCursor<'h> {
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current(&self) -> &'h FlowSnapshot {
        &self.history.snapshots[self.position]
    }

    /// Advances one step; `None` when already on the terminal state
    pub fn step_forward(&mut self) -> Option<&'h FlowSnapshot> {
        if self.is_terminal() {
            return None;
        }
        self.position += 1;
        Some(self.current())
    }

    /// Steps back once; `None` when already on the initial state
    pub fn step_back(&mut self) -> Option<&'h FlowSnapshot> {
        if self.is_initial() {
            return None;
        }
        self.position -= 1;
        Some(self.current())
    }

    /// Jumps to `step`
    pub fn seek(&mut self, step: usize) -> Result<&'h FlowSnapshot, HistoryError> {
        if step >= self.history.len() {
            return Err(HistoryError::InvalidStep {
                step,
                len: self.history.len(),
            });
        }
        self.position = step;
        Ok(self.current())
    }

    pub fn is_initial(&self) -> bool {
        self.position == 0
    }

    pub fn is_terminal(&self) -> bool {
        self.position + 1 == self.history.len()
    }

    /// Caption for the current position, e.g. `Step 2 / 5`
    pub fn caption(&self) -> String {
        if self.is_terminal() {
            format!(
                "Final Step. Max Flow: {}. Min-Cut Edges Highlighted.",
                self.current().total_flow
            )
        } else {
            format!("Step {} / {}", self.position + 1, self.history.len())
        }
    }
}
