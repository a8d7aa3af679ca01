//! Flow Correctness Verification
//!
//! Checks a finished max-flow result against the properties every correct
//! Edmonds-Karp run satisfies:
//!
//! - **Alignment**: every snapshot holds one flow per original edge
//! - **Capacity bound**: `0 <= flow <= capacity` on every edge of every snapshot
//! - **Conservation**: inflow equals outflow at every node other than the
//!   endpoints, and the source's net outflow equals the recorded total
//! - **Monotonic progress**: totals strictly increase step over step
//! - **Max-flow/min-cut equality**: cut capacity equals the max flow
//! - **Termination**: the sink is unreachable in the terminal residual graph
//!
//! Snapshots are independent of each other, so they are checked in
//! parallel. The validator only reads the result; it never takes part in a
//! run.

use rayon::prelude::*;
use thiserror::Error;

use crate::algorithm::graph::max_flow::MaxFlowResult;
use crate::algorithm::graph::min_cut::reachable_set;
use crate::algorithm::traits::{Capacity, EdgeId, Flow, NodeIndex};
use crate::data_structures::graph::{total_capacity, FlowGraph};
use crate::execution::history::FlowSnapshot;

/// A violated flow invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    #[error("Step {step}: snapshot holds {actual} flows, expected {expected}")]
    Misaligned {
        step: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Step {step}: flow {flow} on edge {edge} outside [0, {capacity}]")]
    CapacityBound {
        step: usize,
        edge: EdgeId,
        flow: Flow,
        capacity: Capacity,
    },

    #[error("Step {step}: node {node} has net outflow {net}")]
    Conservation { step: usize, node: String, net: Flow },

    #[error("Step {step}: source emits {emitted} but the recorded total is {recorded}")]
    TotalMismatch {
        step: usize,
        emitted: Flow,
        recorded: Flow,
    },

    #[error("Step {step}: total {current} does not exceed previous total {previous}")]
    NonMonotonic {
        step: usize,
        previous: Flow,
        current: Flow,
    },

    #[error("Expected {expected} steps for {augmentations} augmentations, found {actual}")]
    StepCount {
        augmentations: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Max flow {max_flow} differs from terminal total {terminal}")]
    TerminalMismatch { max_flow: Flow, terminal: Flow },

    #[error("Cut capacity {cut} differs from max flow {max_flow}")]
    CutCapacity { cut: Capacity, max_flow: Flow },

    #[error("Sink {0} is still reachable in the terminal residual graph")]
    ResidualPath(String),
}

/// Verifies `result` as a run of `original` from `source` to `sink`
pub fn verify_result(
    original: &FlowGraph,
    source: &str,
    sink: &str,
    result: &MaxFlowResult<'_>,
) -> Result<(), InvariantViolation> {
    let source_index = original
        .index_of(source)
        .ok_or_else(|| InvariantViolation::UnknownEndpoint(source.to_owned()))?;
    let sink_index = original
        .index_of(sink)
        .ok_or_else(|| InvariantViolation::UnknownEndpoint(sink.to_owned()))?;

    let expected_steps = result.augmentations.len() + 1;
    if result.steps.len() != expected_steps {
        return Err(InvariantViolation::StepCount {
            augmentations: result.augmentations.len(),
            expected: expected_steps,
            actual: result.steps.len(),
        });
    }

    result
        .steps
        .snapshots()
        .par_iter()
        .try_for_each(|snapshot| verify_snapshot(original, source_index, sink_index, snapshot))?;

    verify_progress(result.steps.snapshots())?;

    let terminal = result.steps.terminal().map_or(0, |snapshot| snapshot.total_flow);
    if terminal != result.max_flow {
        return Err(InvariantViolation::TerminalMismatch {
            max_flow: result.max_flow,
            terminal,
        });
    }

    let cut = total_capacity(result.min_cut_edges().iter().copied());
    if cut != result.max_flow {
        return Err(InvariantViolation::CutCapacity {
            cut,
            max_flow: result.max_flow,
        });
    }

    if source_index != sink_index {
        if let Some(snapshot) = result.steps.terminal() {
            let mut state = original.structural_clone();
            state.apply_flows(&snapshot.flows).map_err(|_| InvariantViolation::Misaligned {
                step: snapshot.step,
                expected: original.edge_count(),
                actual: snapshot.flows.len(),
            })?;
            if reachable_set(&state, source_index)[sink_index.0] {
                return Err(InvariantViolation::ResidualPath(sink.to_owned()));
            }
        }
    }

    Ok(())
}

/// Alignment, capacity bound and conservation for one snapshot
pub fn verify_snapshot(
    original: &FlowGraph,
    source: NodeIndex,
    sink: NodeIndex,
    snapshot: &FlowSnapshot,
) -> Result<(), InvariantViolation> {
    if snapshot.flows.len() != original.edge_count() {
        return Err(InvariantViolation::Misaligned {
            step: snapshot.step,
            expected: original.edge_count(),
            actual: snapshot.flows.len(),
        });
    }

    let mut net = vec![0 as Flow; original.node_count()];
    for (edge, &flow) in original.edges().iter().zip(&snapshot.flows) {
        if flow < 0 || flow > edge.capacity() {
            return Err(InvariantViolation::CapacityBound {
                step: snapshot.step,
                edge: edge.id(),
                flow,
                capacity: edge.capacity(),
            });
        }
        net[edge.source().0] += flow;
        net[edge.destination().0] -= flow;
    }

    for node in original.nodes() {
        let index = node.index();
        if index == source || index == sink {
            continue;
        }
        if net[index.0] != 0 {
            return Err(InvariantViolation::Conservation {
                step: snapshot.step,
                node: node.id().to_owned(),
                net: net[index.0],
            });
        }
    }

    if source != sink && net[source.0] != snapshot.total_flow {
        return Err(InvariantViolation::TotalMismatch {
            step: snapshot.step,
            emitted: net[source.0],
            recorded: snapshot.total_flow,
        });
    }

    Ok(())
}

/// Strictly increasing totals across consecutive snapshots
pub fn verify_progress(snapshots: &[FlowSnapshot]) -> Result<(), InvariantViolation> {
    for pair in snapshots.windows(2) {
        if pair[1].total_flow <= pair[0].total_flow {
            return Err(InvariantViolation::NonMonotonic {
                step: pair[1].step,
                previous: pair[0].total_flow,
                current: pair[1].total_flow,
            });
        }
    }
    Ok(())
}
