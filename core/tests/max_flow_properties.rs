//! End-to-end properties of Edmonds-Karp runs

use flowscope_core::algorithm::graph::reachable_set;
use flowscope_core::{
    residual_arcs, run, verify_result, CoincidentEndpoints, EdmondsKarp, FlowError, FlowGraph,
    GraphError, MaxFlowAlgorithm, SolverConfig,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sample_network() -> FlowGraph {
    let json = r#"{
        "nodes": [
            {"id": "S", "x": 50, "y": 250},
            {"id": "A", "x": 200, "y": 100},
            {"id": "B", "x": 200, "y": 400},
            {"id": "C", "x": 400, "y": 100},
            {"id": "D", "x": 400, "y": 400},
            {"id": "T", "x": 600, "y": 250}
        ],
        "edges": [
            {"source": "S", "destination": "A", "capacity": 10},
            {"source": "S", "destination": "B", "capacity": 10},
            {"source": "A", "destination": "B", "capacity": 2},
            {"source": "A", "destination": "C", "capacity": 4},
            {"source": "A", "destination": "D", "capacity": 8},
            {"source": "B", "destination": "D", "capacity": 9},
            {"source": "C", "destination": "T", "capacity": 10},
            {"source": "D", "destination": "T", "capacity": 10},
            {"source": "D", "destination": "C", "capacity": 6}
        ]
    }"#;
    FlowGraph::from_json(json).unwrap()
}

/// Deterministic pseudo-random graph
fn generated_network(seed: u64, nodes: usize, edges: usize) -> FlowGraph {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = move |bound: u64| {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 33) % bound
    };

    let mut graph = FlowGraph::new();
    for i in 0..nodes {
        graph.add_node(format!("n{}", i), i as f64, 0.0).unwrap();
    }
    for _ in 0..edges {
        let from = next(nodes as u64) as usize;
        let to = next(nodes as u64) as usize;
        let capacity = next(20) as i64;
        graph
            .add_edge(&format!("n{}", from), &format!("n{}", to), capacity)
            .unwrap();
    }
    graph
}

#[test]
fn sample_network_matches_expected_cut() {
    init_logging();
    let graph = sample_network();
    let result = run(&graph, "S", "T").unwrap();

    assert_eq!(result.max_flow, 19);
    let mut cut: Vec<_> = result
        .min_cut_edges()
        .iter()
        .map(|edge| {
            (
                graph.node(edge.source()).id().to_string(),
                graph.node(edge.destination()).id().to_string(),
                edge.capacity(),
            )
        })
        .collect();
    cut.sort();
    assert_eq!(
        cut,
        vec![
            ("B".to_string(), "D".to_string(), 9),
            ("S".to_string(), "A".to_string(), 10)
        ]
    );
    assert_eq!(verify_result(&graph, "S", "T", &result), Ok(()));
}

#[test]
fn generated_networks_satisfy_every_invariant() {
    init_logging();
    for seed in 0..40 {
        let graph = generated_network(seed, 8, 24);
        let result = run(&graph, "n0", "n7").unwrap();

        assert_eq!(verify_result(&graph, "n0", "n7", &result), Ok(()), "seed {}", seed);
        assert_eq!(result.step_count(), result.augmentations.len() + 1);
        assert_eq!(result.cut_capacity(), result.max_flow);

        for snapshot in result.steps.iter() {
            for (edge, &flow) in graph.edges().iter().zip(&snapshot.flows) {
                assert!(flow >= 0 && flow <= edge.capacity(), "seed {}", seed);
            }
        }
    }
}

#[test]
fn repeated_runs_are_identical() {
    let graph = generated_network(7, 10, 40);
    let first = run(&graph, "n0", "n9").unwrap();
    let second = run(&graph, "n0", "n9").unwrap();

    assert_eq!(first.max_flow, second.max_flow);
    assert_eq!(first.step_count(), second.step_count());
    assert_eq!(first.steps, second.steps);

    let rebuilt = FlowGraph::from_document(&graph.to_document()).unwrap();
    let third = run(&rebuilt, "n0", "n9").unwrap();
    assert_eq!(first.steps, third.steps);
}

#[test]
fn replay_walks_every_step() {
    let graph = sample_network();
    let result = run(&graph, "S", "T").unwrap();

    let mut cursor = result.steps.cursor().unwrap();
    let mut totals = vec![cursor.current().total_flow];
    while let Some(snapshot) = cursor.step_forward() {
        totals.push(snapshot.total_flow);
    }
    assert_eq!(totals, result.steps.totals());
    assert!(cursor.caption().contains("Max Flow: 19"));

    let terminal = result.steps.materialize(result.step_count() - 1, &graph).unwrap();
    let arcs = residual_arcs(&terminal);
    let sink = graph.index_of("T").unwrap();
    let source = graph.index_of("S").unwrap();
    assert!(arcs.iter().any(|arc| arc.from == sink));
    assert!(!reachable_set(&terminal, source)[sink.as_usize()]);
}

#[test]
fn parallel_edges_are_cut_individually() {
    let mut graph = FlowGraph::new();
    graph.add_node("S", 0.0, 0.0).unwrap();
    graph.add_node("M", 1.0, 0.0).unwrap();
    graph.add_node("T", 2.0, 0.0).unwrap();
    let narrow = graph.add_edge("S", "M", 1).unwrap();
    let wide = graph.add_edge("S", "M", 2).unwrap();
    graph.add_edge("M", "T", 10).unwrap();

    let result = run(&graph, "S", "T").unwrap();
    assert_eq!(result.max_flow, 3);
    let ids: Vec<_> = result.min_cut_edges().iter().map(|edge| edge.id()).collect();
    assert_eq!(ids, vec![narrow, wide]);
}

#[test]
fn anti_parallel_edges_are_independent() {
    let mut graph = FlowGraph::new();
    graph.add_node("S", 0.0, 0.0).unwrap();
    graph.add_node("T", 1.0, 0.0).unwrap();
    graph.add_edge("S", "T", 5).unwrap();
    graph.add_edge("T", "S", 5).unwrap();

    let result = run(&graph, "S", "T").unwrap();
    assert_eq!(result.max_flow, 5);
    assert_eq!(result.steps.terminal().unwrap().flows, vec![5, 0]);
}

#[test]
fn construction_errors_are_typed() {
    let mut graph = FlowGraph::new();
    graph.add_node("S", 0.0, 0.0).unwrap();
    assert_eq!(
        graph.add_node("S", 1.0, 1.0),
        Err(GraphError::DuplicateNode("S".to_string()))
    );
    assert_eq!(
        graph.add_edge("S", "T", 1),
        Err(GraphError::UnknownNode("T".to_string()))
    );
    graph.add_node("T", 0.0, 0.0).unwrap();
    assert!(matches!(
        graph.add_edge("S", "T", -3),
        Err(GraphError::InvalidCapacity { capacity: -3, .. })
    ));
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn run_failures_leave_no_partial_result() {
    let graph = sample_network();
    assert!(matches!(run(&graph, "S", "missing"), Err(FlowError::EndpointNotFound(_))));

    let mut solver = EdmondsKarp::with_config(SolverConfig {
        coincident_endpoints: CoincidentEndpoints::Reject,
        ..SolverConfig::default()
    });
    assert!(matches!(
        solver.solve(&graph, "T", "T"),
        Err(FlowError::CoincidentEndpoints(_))
    ));
}
