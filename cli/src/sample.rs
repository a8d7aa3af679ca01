//! Built-in sample network

use flowscope_core::{FlowGraph, GraphError};

pub const SOURCE: &str = "S";
pub const SINK: &str = "T";

/// Six-node network with max flow 19 from S to T, cut {S -> A, B -> D}
pub fn sample_network() -> Result<FlowGraph, GraphError> {
    let mut graph = FlowGraph::with_capacity(6, 9);
    graph.add_node("S", 50.0, 250.0)?;
    graph.add_node("A", 200.0, 100.0)?;
    graph.add_node("B", 200.0, 400.0)?;
    graph.add_node("C", 400.0, 100.0)?;
    graph.add_node("D", 400.0, 400.0)?;
    graph.add_node("T", 600.0, 250.0)?;

    graph.add_edge("S", "A", 10)?;
    graph.add_edge("S", "B", 10)?;
    graph.add_edge("A", "B", 2)?;
    graph.add_edge("A", "C", 4)?;
    graph.add_edge("A", "D", 8)?;
    graph.add_edge("B", "D", 9)?;
    graph.add_edge("C", "T", 10)?;
    graph.add_edge("D", "T", 10)?;
    graph.add_edge("D", "C", 6)?;

    Ok(graph)
}
