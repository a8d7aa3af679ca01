//! Capacitated flow graph with stable insertion order
//!
//! This module implements the graph representation consumed by the max-flow
//! engine. Nodes and edges are stored in insertion order, which fixes the
//! traversal order of every search and makes runs reproducible. An
//! incidence index maps each node to the edges touching it, giving O(1)
//! access to the neighborhood of any node.
//!
//! # Invariants
//! - Node ids are unique; `NodeIndex` is the insertion position
//! - `EdgeId` is the insertion position and never changes
//! - `0 <= flow <= capacity` on every edge at every observable point
//!
//! Display coordinates are carried through unmodified and never read by
//! the algorithms.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{Capacity, EdgeId, Flow, GraphError, NodeIndex};

/// 2D display position, opaque to the algorithms
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Graph node identified by its string id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: String,
    index: NodeIndex,
    position: Position,
}

impl Node {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn index(&self) -> NodeIndex {
        self.index
    }

    pub fn position(&self) -> Position {
        self.position
    }
}

/// Directed capacitated edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    id: EdgeId,
    source: NodeIndex,
    destination: NodeIndex,
    capacity: Capacity,
    flow: Flow,
}

impl Edge {
    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn source(&self) -> NodeIndex {
        self.source
    }

    pub fn destination(&self) -> NodeIndex {
        self.destination
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    /// Remaining forward capacity
    #[inline]
    pub fn residual_capacity(&self) -> Capacity {
        self.capacity - self.flow
    }

    #[inline]
    pub fn is_saturated(&self) -> bool {
        self.flow == self.capacity
    }

    pub(crate) fn set_flow(&mut self, flow: Flow) {
        debug_assert!(
            (0..=self.capacity).contains(&flow),
            "flow {} outside [0, {}] on {}",
            flow,
            self.capacity,
            self.id
        );
        self.flow = flow;
    }
}

/// Directed capacitated graph
#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    /// Nodes in insertion order
    nodes: Vec<Node>,

    /// Edges in insertion order
    edges: Vec<Edge>,

    /// Node id to dense index
    lookup: HashMap<String, NodeIndex>,

    /// Per-node incident edges (as source or destination), in edge order
    incidence: Vec<Vec<EdgeId>>,

    /// Sum of all edge capacities; bounds every flow total and node balance
    capacity_total: Capacity,
}

impl FlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
            lookup: HashMap::with_capacity(nodes),
            incidence: Vec::with_capacity(nodes),
            capacity_total: 0,
        }
    }

    /// Adds a node with display coordinates.
    ///
    /// Fails with `DuplicateNode` if the id is already present.
    pub fn add_node(&mut self, id: impl Into<String>, x: f64, y: f64) -> Result<NodeIndex, GraphError> {
        let id = id.into();
        if self.lookup.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }

        let index = NodeIndex(self.nodes.len());
        self.lookup.insert(id.clone(), index);
        self.nodes.push(Node {
            id,
            index,
            position: Position::new(x, y),
        });
        self.incidence.push(Vec::new());

        Ok(index)
    }

    /// Adds a directed edge with zero flow.
    ///
    /// Fails with `UnknownNode` if either endpoint is absent, with
    /// `InvalidCapacity` if `capacity` is negative and with
    /// `CapacityOverflow` if the graph's total capacity would exceed
    /// `Capacity::MAX`.
    pub fn add_edge(&mut self, source: &str, destination: &str, capacity: Capacity) -> Result<EdgeId, GraphError> {
        let from = self
            .index_of(source)
            .ok_or_else(|| GraphError::UnknownNode(source.to_owned()))?;
        let to = self
            .index_of(destination)
            .ok_or_else(|| GraphError::UnknownNode(destination.to_owned()))?;

        if capacity < 0 {
            return Err(GraphError::InvalidCapacity {
                from: source.to_owned(),
                to: destination.to_owned(),
                capacity,
            });
        }

        let capacity_total = self
            .capacity_total
            .checked_add(capacity)
            .ok_or_else(|| GraphError::CapacityOverflow {
                from: source.to_owned(),
                to: destination.to_owned(),
                capacity,
            })?;

        let id = self.push_edge(from, to, capacity);
        self.capacity_total = capacity_total;
        Ok(id)
    }

    fn push_edge(&mut self, from: NodeIndex, to: NodeIndex, capacity: Capacity) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge {
            id,
            source: from,
            destination: to,
            capacity,
            flow: 0,
        });

        self.incidence[from.0].push(id);
        // Self-loops appear once
        if to != from {
            self.incidence[to.0].push(id);
        }

        id
    }

    /// Looks up a node by id
    pub fn node_by_id(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|index| &self.nodes[index.0])
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.lookup.get(id).copied()
    }

    /// Returns the node at `index`.
    ///
    /// # Panics
    /// Panics if `index` was not issued by this graph or its structural clones.
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.0]
    }

    /// Returns the edge with id `id`.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this graph or its structural clones.
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    pub(crate) fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.0]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Sum of all edge capacities
    pub fn capacity_total(&self) -> Capacity {
        self.capacity_total
    }

    /// Edges touching the node `id`, in edge insertion order.
    ///
    /// Empty for unknown ids and isolated nodes.
    pub fn incident_edges(&self, id: &str) -> &[EdgeId] {
        self.index_of(id)
            .map(|index| self.incident(index))
            .unwrap_or(&[])
    }

    /// Edges touching the node at `index`, in edge insertion order
    pub fn incident(&self, index: NodeIndex) -> &[EdgeId] {
        self.incidence
            .get(index.0)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resets every edge flow to zero
    pub fn reset_flow(&mut self) {
        for edge in &mut self.edges {
            edge.flow = 0;
        }
    }

    /// Returns a new graph with identical node ids, coordinates, edge
    /// topology and capacities, and all flows reset to zero.
    ///
    /// Node indices and edge ids of the clone equal those of `self`.
    pub fn structural_clone(&self) -> FlowGraph {
        let mut copy = FlowGraph::with_capacity(self.nodes.len(), self.edges.len());
        for node in &self.nodes {
            copy.lookup.insert(node.id.clone(), node.index);
            copy.nodes.push(node.clone());
            copy.incidence.push(Vec::new());
        }
        for edge in &self.edges {
            copy.push_edge(edge.source, edge.destination, edge.capacity);
        }
        copy.capacity_total = self.capacity_total;
        copy
    }

    /// Current flow of every edge, aligned to edge order
    pub fn flows(&self) -> Vec<Flow> {
        self.edges.iter().map(Edge::flow).collect()
    }

    /// Overwrites every edge flow from a vector aligned to edge order.
    ///
    /// The graph is left untouched if the vector is misaligned or any value
    /// violates its edge's capacity bound.
    pub fn apply_flows(&mut self, flows: &[Flow]) -> Result<(), GraphError> {
        if flows.len() != self.edges.len() {
            return Err(GraphError::FlowLengthMismatch {
                expected: self.edges.len(),
                actual: flows.len(),
            });
        }
        if let Some((edge, &flow)) = self
            .edges
            .iter()
            .zip(flows)
            .find(|&(edge, &flow)| flow < 0 || flow > edge.capacity)
        {
            return Err(GraphError::FlowOutOfBounds {
                edge: edge.id,
                flow,
                capacity: edge.capacity,
            });
        }

        for (edge, &flow) in self.edges.iter_mut().zip(flows) {
            edge.flow = flow;
        }
        Ok(())
    }

    /// Flow leaving `index` minus flow entering it
    pub fn net_outflow(&self, index: NodeIndex) -> Flow {
        self.incident(index)
            .iter()
            .map(|&id| {
                let edge = &self.edges[id.0];
                match (edge.source == index, edge.destination == index) {
                    (true, false) => edge.flow,
                    (false, true) => -edge.flow,
                    _ => 0,
                }
            })
            .sum()
    }

    /// Human-readable `source -> destination` label of an edge
    pub fn describe_edge(&self, id: EdgeId) -> String {
        let edge = self.edge(id);
        format!(
            "{} -> {}",
            self.nodes[edge.source.0].id, self.nodes[edge.destination.0].id
        )
    }

    /// Builds a graph from a document through `add_node` and `add_edge`,
    /// so every construction check applies.
    pub fn from_document(document: &GraphDocument) -> Result<FlowGraph, GraphError> {
        let mut graph = FlowGraph::with_capacity(document.nodes.len(), document.edges.len());
        for node in &document.nodes {
            graph.add_node(node.id.as_str(), node.x, node.y)?;
        }
        for edge in &document.edges {
            graph.add_edge(&edge.source, &edge.destination, edge.capacity)?;
        }
        Ok(graph)
    }

    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            nodes: self
                .nodes
                .iter()
                .map(|node| NodeSpec {
                    id: node.id.clone(),
                    x: node.position.x,
                    y: node.position.y,
                })
                .collect(),
            edges: self
                .edges
                .iter()
                .map(|edge| EdgeSpec {
                    source: self.nodes[edge.source.0].id.clone(),
                    destination: self.nodes[edge.destination.0].id.clone(),
                    capacity: edge.capacity,
                })
                .collect(),
        }
    }

    /// Parses a JSON graph document
    pub fn from_json(json: &str) -> Result<FlowGraph, GraphError> {
        let document: GraphDocument =
            serde_json::from_str(json).map_err(|e| GraphError::Document(e.to_string()))?;
        Self::from_document(&document)
    }

    pub fn to_json_pretty(&self) -> Result<String, GraphError> {
        serde_json::to_string_pretty(&self.to_document()).map_err(|e| GraphError::Document(e.to_string()))
    }
}

/// Sum of capacities over a set of edges
pub fn total_capacity<'a>(edges: impl IntoIterator<Item = &'a Edge>) -> Capacity {
    edges
        .into_iter()
        .map(Edge::capacity)
        .fold(0, Capacity::saturating_add)
}

/// Serializable graph description
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub source: String,
    pub destination: String,
    pub capacity: Capacity,
}
