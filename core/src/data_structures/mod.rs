//! Graph storage for the flow engine

pub mod graph;

pub use self::graph::{total_capacity, Edge, EdgeSpec, FlowGraph, GraphDocument, Node, NodeSpec, Position};
