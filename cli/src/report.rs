//! Plain-text step report

use std::fmt::Write;

use flowscope_core::{Augmentation, FlowGraph, MaxFlowResult};

/// Renders every step of a run followed by the max flow and the cut
pub fn render(graph: &FlowGraph, source: &str, sink: &str, result: &MaxFlowResult<'_>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(out, "Edmonds-Karp: {} -> {}", source, sink);

    if let Some(mut cursor) = result.steps.cursor() {
        loop {
            let snapshot = cursor.current();
            let detail = match snapshot.step.checked_sub(1).and_then(|i| result.augmentations.get(i)) {
                Some(augmentation) => format!(
                    "+{}{} (total {})",
                    augmentation.bottleneck,
                    describe_path(graph, augmentation),
                    snapshot.total_flow
                ),
                None => format!("initial flow {}", snapshot.total_flow),
            };
            let _ = writeln!(out, "Step {} / {}: {}", cursor.position() + 1, result.step_count(), detail);

            if cursor.step_forward().is_none() {
                break;
            }
        }
    }

    let _ = writeln!(out, "Max flow: {}", result.max_flow);
    let _ = writeln!(out, "Min cut (capacity {}):", result.cut_capacity());
    for edge in result.min_cut_edges() {
        let _ = writeln!(out, "  {} ({})", graph.describe_edge(edge.id()), edge.capacity());
    }
    let side: Vec<_> = result.source_side().iter().map(|node| node.id()).collect();
    let _ = writeln!(out, "Source side: {}", side.join(", "));

    out
}

fn describe_path(graph: &FlowGraph, augmentation: &Augmentation) -> String {
    let Some(first) = augmentation.arcs.first() else {
        return String::new();
    };
    let mut ids = vec![graph.node(first.from).id()];
    ids.extend(augmentation.arcs.iter().map(|arc| graph.node(arc.to).id()));
    format!(" via {}", ids.join(" -> "))
}
