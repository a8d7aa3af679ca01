//! Edmonds-Karp Maximum Flow Implementation
//!
//! This module drives the augmenting-path method: repeatedly find a shortest
//! augmenting path by BFS, push its bottleneck, and record the resulting flow
//! state, until the sink is unreachable in the residual graph. The minimum
//! cut is then read off the terminal residual graph.
//!
//! # Complexity Analysis
//! - Augmentations: O(V·E), guaranteed by shortest-path (BFS) selection
//! - Per augmentation: O(V + E)
//! - Overall: O(V·E²)
//!
//! # Lifecycle
//! The caller's graph is never mutated. A run works on a structural clone
//! with zeroed flow, records snapshot 0 before searching, and appends one
//! snapshot per augmentation, so `k` augmentations produce `k + 1` steps.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;
use std::time::Instant;

use log::{debug, info, warn};
use serde::Serialize;

use crate::algorithm::graph::augment::{Augmentation, FlowAugmenter};
use crate::algorithm::graph::augmenting_path::AugmentingPathFinder;
use crate::algorithm::graph::min_cut::{MinCut, MinCutExtractor};
use crate::algorithm::state::{RunPhase, RunStateMachine};
use crate::algorithm::traits::{
    Algorithm, AlgorithmComplexity, Capacity, Flow, FlowError, FlowMetrics, MaxFlowAlgorithm,
    NodeIndex,
};
use crate::config::{CoincidentEndpoints, SolverConfig};
use crate::data_structures::graph::{Edge, FlowGraph, Node};
use crate::execution::history::FlowHistory;
use crate::validation::correctness::verify_result;

/// Outcome of a max-flow run.
///
/// Cut edges and source-side nodes borrow from the graph passed to the
/// solver, so callers see their own edge objects.
#[derive(Debug, Clone, Serialize)]
pub struct MaxFlowResult<'g> {
    /// Maximum flow value
    pub max_flow: Flow,
    /// Flow snapshots; index 0 is the zero state, the last is terminal
    pub steps: FlowHistory,
    /// Minimum cut resolved against the caller's graph
    pub min_cut: MinCut<'g>,
    /// One record per augmentation, in order
    pub augmentations: Vec<Augmentation>,
    /// Run metrics
    pub metrics: FlowMetrics,
}

impl<'g> MaxFlowResult<'g> {
    /// Cut edges from the caller's graph
    pub fn min_cut_edges(&self) -> &[&'g Edge] {
        &self.min_cut.edges
    }

    /// Nodes on the source side of the cut
    pub fn source_side(&self) -> &[&'g Node] {
        &self.min_cut.source_side
    }

    /// Total capacity of the cut edges
    pub fn cut_capacity(&self) -> Capacity {
        self.min_cut.capacity
    }

    /// Number of recorded steps (augmentations + 1)
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Edmonds-Karp solver
#[derive(Debug, Clone, Default)]
pub struct EdmondsKarp {
    config: SolverConfig,
}

impl EdmondsKarp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    fn resolve(graph: &FlowGraph, id: &str) -> Result<NodeIndex, FlowError> {
        graph
            .index_of(id)
            .ok_or_else(|| FlowError::EndpointNotFound(id.to_owned()))
    }

    /// Result of a run whose source is also its sink
    fn coincident<'g>(&self, graph: &'g FlowGraph, id: &str) -> Result<MaxFlowResult<'g>, FlowError> {
        match self.config.coincident_endpoints {
            CoincidentEndpoints::Reject => Err(FlowError::CoincidentEndpoints(id.to_owned())),
            CoincidentEndpoints::Trivial => {
                warn!("source and sink are both {}; returning zero flow", id);
                let started = Instant::now();
                let mut machine = RunStateMachine::new();
                let working = graph.structural_clone();
                let mut steps = FlowHistory::new(working.edge_count());
                steps.record(&working, 0)?;
                machine.transition(RunPhase::Finalizing)?;
                machine.transition(RunPhase::Done)?;

                let result = MaxFlowResult {
                    max_flow: 0,
                    steps,
                    min_cut: MinCut::empty(),
                    augmentations: Vec::new(),
                    metrics: FlowMetrics {
                        execution_time_ms: started.elapsed().as_secs_f64() * 1000.0,
                        ..FlowMetrics::default()
                    },
                };
                if self.config.verify_invariants {
                    verify_result(graph, id, id, &result)?;
                }
                Ok(result)
            }
        }
    }
}

impl Algorithm for EdmondsKarp {
    fn name(&self) -> &'static str {
        "Edmonds-Karp"
    }

    fn category(&self) -> &'static str {
        "max_flow"
    }

    fn description(&self) -> String {
        "Maximum flow by shortest augmenting paths (BFS over the residual graph), \
         with minimum cut extraction and a per-augmentation flow history for replay."
            .to_string()
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity {
            time_complexity: "O(V·E²)".to_string(),
            space_complexity: "O(V + E·k) for k augmentations".to_string(),
            iteration_bound: "O(V·E) augmentations".to_string(),
        }
    }

    fn parameters(&self) -> HashMap<String, String> {
        self.config.to_parameters()
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), FlowError> {
        self.config.set(name, value)
    }

    fn get_parameter(&self, name: &str) -> Option<String> {
        self.config.get(name)
    }
}

impl MaxFlowAlgorithm for EdmondsKarp {
    fn solve<'g>(
        &mut self,
        graph: &'g FlowGraph,
        source: &str,
        sink: &str,
    ) -> Result<MaxFlowResult<'g>, FlowError> {
        let source_index = Self::resolve(graph, source)?;
        let sink_index = Self::resolve(graph, sink)?;
        if source_index == sink_index {
            return self.coincident(graph, source);
        }

        let started = Instant::now();
        let mut machine = RunStateMachine::new();
        let mut working = graph.structural_clone();
        let mut steps = FlowHistory::new(working.edge_count());
        steps.record(&working, 0)?;

        let mut finder = AugmentingPathFinder::new(working.node_count());
        let mut augmentations = Vec::new();
        let mut total: Flow = 0;

        loop {
            machine.transition(RunPhase::Searching)?;
            let Some(path) = finder.find(&working, source_index, sink_index) else {
                break;
            };

            machine.transition(RunPhase::Augmenting)?;
            let bottleneck = FlowAugmenter::augment(&mut working, &path);
            // Bounded by the graph's capacity total, which add_edge keeps in range
            total += bottleneck;
            let step = steps.record(&working, total)?;
            debug!(
                "augmentation {}: pushed {} along {} (total {})",
                step,
                bottleneck,
                path.describe(&working),
                total
            );

            augmentations.push(Augmentation {
                step,
                bottleneck,
                arcs: if self.config.record_paths {
                    path.into_arcs()
                } else {
                    Vec::new()
                },
            });
        }

        machine.transition(RunPhase::Finalizing)?;
        let min_cut = MinCutExtractor::extract(&working, graph, source_index)?;
        machine.transition(RunPhase::Done)?;

        let metrics = FlowMetrics {
            augmentations: machine.augmentations(),
            nodes_explored: finder.nodes_explored(),
            arcs_scanned: finder.arcs_scanned(),
            execution_time_ms: started.elapsed().as_secs_f64() * 1000.0,
        };
        let result = MaxFlowResult {
            max_flow: total,
            steps,
            min_cut,
            augmentations,
            metrics,
        };

        if self.config.verify_invariants {
            verify_result(graph, source, sink, &result)?;
        }

        info!(
            "max flow {} -> {}: {} after {} augmentations, {} cut edges",
            source,
            sink,
            result.max_flow,
            result.metrics.augmentations,
            result.min_cut.len()
        );
        Ok(result)
    }
}

/// Runs Edmonds-Karp with the default configuration.
///
/// Fails with `EndpointNotFound` if `source` or `sink` is not a node of
/// `graph`.
pub fn run<'g>(graph: &'g FlowGraph, source: &str, sink: &str) -> Result<MaxFlowResult<'g>, FlowError> {
    EdmondsKarp::new().solve(graph, source, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::traits::{EdgeId, GraphError};

    fn sample_network() -> FlowGraph {
        let mut graph = FlowGraph::new();
        graph.add_node("S", 50.0, 250.0).unwrap();
        graph.add_node("A", 200.0, 100.0).unwrap();
        graph.add_node("B", 200.0, 400.0).unwrap();
        graph.add_node("C", 400.0, 100.0).unwrap();
        graph.add_node("D", 400.0, 400.0).unwrap();
        graph.add_node("T", 600.0, 250.0).unwrap();

        graph.add_edge("S", "A", 10).unwrap();
        graph.add_edge("S", "B", 10).unwrap();
        graph.add_edge("A", "B", 2).unwrap();
        graph.add_edge("A", "C", 4).unwrap();
        graph.add_edge("A", "D", 8).unwrap();
        graph.add_edge("B", "D", 9).unwrap();
        graph.add_edge("C", "T", 10).unwrap();
        graph.add_edge("D", "T", 10).unwrap();
        graph.add_edge("D", "C", 6).unwrap();
        graph
    }

    #[test]
    fn test_sample_network_max_flow_and_cut() {
        let graph = sample_network();
        let result = run(&graph, "S", "T").unwrap();

        assert_eq!(result.max_flow, 19);
        let cut: Vec<_> = result
            .min_cut_edges()
            .iter()
            .map(|edge| graph.describe_edge(edge.id()))
            .collect();
        assert_eq!(cut, vec!["S -> A", "B -> D"]);
        assert_eq!(result.cut_capacity(), 19);
        assert!(std::ptr::eq(result.min_cut_edges()[0], graph.edge(EdgeId(0))));
    }

    #[test]
    fn test_sample_network_steps() {
        let graph = sample_network();
        let result = run(&graph, "S", "T").unwrap();

        assert_eq!(result.step_count(), result.augmentations.len() + 1);
        assert_eq!(result.metrics.augmentations, result.augmentations.len());
        assert_eq!(result.steps.initial().unwrap().flows, vec![0; 9]);
        assert_eq!(result.steps.terminal().unwrap().total_flow, 19);

        // Shortest paths first: S-A-C-T, S-A-D-T, S-B-D-T, then S-B-D-C-T
        let bottlenecks: Vec<_> = result.augmentations.iter().map(|a| a.bottleneck).collect();
        assert_eq!(bottlenecks, vec![4, 6, 4, 5]);
        assert_eq!(result.steps.totals(), vec![0, 4, 10, 14, 19]);
    }

    #[test]
    fn test_caller_graph_is_untouched() {
        let graph = sample_network();
        let before = graph.to_document();
        run(&graph, "S", "T").unwrap();
        assert_eq!(graph.flows(), vec![0; 9]);
        assert_eq!(graph.to_document(), before);
    }

    #[test]
    fn test_rerun_is_deterministic() {
        let graph = sample_network();
        let first = run(&graph, "S", "T").unwrap();
        let second = run(&graph, "S", "T").unwrap();
        assert_eq!(first.max_flow, second.max_flow);
        assert_eq!(first.steps, second.steps);
        assert_eq!(first.augmentations, second.augmentations);
    }

    #[test]
    fn test_unknown_endpoints() {
        let graph = sample_network();
        assert!(matches!(
            run(&graph, "X", "T"),
            Err(FlowError::EndpointNotFound(id)) if id == "X"
        ));
        assert!(matches!(
            run(&graph, "S", "Y"),
            Err(FlowError::EndpointNotFound(id)) if id == "Y"
        ));
    }

    #[test]
    fn test_coincident_endpoints_policies() {
        let graph = sample_network();

        let trivial = run(&graph, "A", "A").unwrap();
        assert_eq!(trivial.max_flow, 0);
        assert_eq!(trivial.step_count(), 1);
        assert!(trivial.min_cut.is_empty());

        let mut solver = EdmondsKarp::new();
        solver.set_parameter("coincident_endpoints", "reject").unwrap();
        assert!(matches!(
            solver.solve(&graph, "A", "A"),
            Err(FlowError::CoincidentEndpoints(id)) if id == "A"
        ));
    }

    #[test]
    fn test_disconnected_sink() {
        let mut graph = sample_network();
        graph.add_node("Z", 0.0, 0.0).unwrap();
        let result = run(&graph, "S", "Z").unwrap();
        assert_eq!(result.max_flow, 0);
        assert_eq!(result.step_count(), 1);
        assert!(result.min_cut_edges().is_empty());
        assert_eq!(result.source_side().len(), 6);
    }

    #[test]
    fn test_path_recording_can_be_disabled() {
        let graph = sample_network();
        let config = SolverConfig {
            record_paths: false,
            ..SolverConfig::default()
        };
        let result = EdmondsKarp::with_config(config).solve(&graph, "S", "T").unwrap();
        assert_eq!(result.augmentations.len(), 4);
        assert!(result.augmentations.iter().all(|a| a.arcs.is_empty()));
    }

    #[test]
    fn test_verified_run() {
        let graph = sample_network();
        let mut solver = EdmondsKarp::new();
        solver.set_parameter("verify_invariants", "true").unwrap();
        assert_eq!(solver.solve(&graph, "S", "T").unwrap().max_flow, 19);
    }

    #[test]
    fn test_verified_coincident_run() {
        let graph = sample_network();
        let mut solver = EdmondsKarp::new();
        solver.set_parameter("verify_invariants", "true").unwrap();
        let result = solver.solve(&graph, "C", "C").unwrap();
        assert_eq!(result.max_flow, 0);
        assert_eq!(result.steps.terminal().unwrap().flows, vec![0; 9]);
    }

    #[test]
    fn test_capacity_at_the_integer_limit() {
        let mut graph = FlowGraph::new();
        graph.add_node("S", 0.0, 0.0).unwrap();
        graph.add_node("T", 0.0, 0.0).unwrap();
        graph.add_edge("S", "T", Capacity::MAX).unwrap();
        assert!(matches!(
            graph.add_edge("S", "T", Capacity::MAX),
            Err(GraphError::CapacityOverflow { capacity: Capacity::MAX, .. })
        ));

        let mut solver = EdmondsKarp::new();
        solver.set_parameter("verify_invariants", "true").unwrap();
        let result = solver.solve(&graph, "S", "T").unwrap();
        assert_eq!(result.max_flow, Capacity::MAX);
        assert_eq!(result.cut_capacity(), Capacity::MAX);
        assert_eq!(result.steps.totals(), vec![0, Capacity::MAX]);
    }

    #[test]
    fn test_solver_metadata() {
        let solver = EdmondsKarp::new();
        assert_eq!(solver.name(), "Edmonds-Karp");
        assert_eq!(solver.category(), "max_flow");
        assert_eq!(solver.complexity().time_complexity, "O(V·E²)");
        assert_eq!(solver.get_parameter("record_paths").as_deref(), Some("true"));
        assert_eq!(solver.parameters().len(), 3);
    }

    #[test]
    fn test_result_serializes() {
        let graph = sample_network();
        let result = run(&graph, "S", "T").unwrap();
        let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(json["max_flow"], 19);
        assert_eq!(json["min_cut"]["edges"].as_array().unwrap().len(), 2);
        assert_eq!(json["steps"]["snapshots"].as_array().unwrap().len(), 5);
    }
}
