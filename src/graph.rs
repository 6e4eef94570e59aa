//! In-memory graph model: styled nodes and edges with a single directedness
//! flag.
//!
//! The graph is built once per run, handed to the layout engine, then to the
//! render adapter. Nodes and edges only accumulate; nothing is removed.

use std::collections::HashMap;

use log::trace;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use thiserror::Error;

use crate::style::{EdgeStyle, NodeStyle};

/// Errors raised while building a graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A node with this id already exists.
    #[error("duplicate node id `{0}`")]
    DuplicateNode(String),

    /// An edge referenced a node id that was never added.
    #[error("edge references unknown node `{0}`")]
    UnknownNode(String),

    /// Directedness was changed after edges were added.
    #[error("directedness must be set before any edges are added")]
    DirectednessLocked,
}

/// A graph node: unique id, optional display label, and a style descriptor.
#[derive(Debug, Clone)]
pub struct Node {
    id: String,
    label: Option<String>,
    style: NodeStyle,
}

impl Node {
    /// Returns the unique id of this node
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the text the renderer should display: the label when one was
    /// provided, the id otherwise.
    pub fn display_text(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }

    /// Returns the style descriptor of this node
    pub fn style(&self) -> &NodeStyle {
        &self.style
    }
}

/// A graph with string-keyed nodes, styled edges, and a uniform directedness
/// flag.
///
/// Edges are always stored with their insertion orientation; whether that
/// orientation is meaningful is decided by [`Graph::set_directed`]. The layout
/// engine treats every edge as a symmetric spring either way, so directedness
/// only affects rendering (arrowheads).
#[derive(Debug, Default)]
pub struct Graph {
    graph: DiGraph<Node, EdgeStyle>,
    node_indices: HashMap<String, NodeIndex>,
    directed: bool,
}

impl Graph {
    /// Creates an empty undirected graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether edge orientation is meaningful.
    ///
    /// Must be called before any edges are added; afterwards the flag is
    /// locked and changing it fails with [`GraphError::DirectednessLocked`].
    pub fn set_directed(&mut self, directed: bool) -> Result<(), GraphError> {
        if self.graph.edge_count() > 0 && directed != self.directed {
            return Err(GraphError::DirectednessLocked);
        }
        self.directed = directed;
        Ok(())
    }

    /// Returns whether edge orientation is meaningful
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Adds a node, using the id itself as the display text.
    pub fn add_node(
        &mut self,
        id: impl Into<String>,
        style: NodeStyle,
    ) -> Result<NodeIndex, GraphError> {
        self.insert_node(id.into(), None, style)
    }

    /// Adds a node with an explicit display label.
    pub fn add_node_with_label(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        style: NodeStyle,
    ) -> Result<NodeIndex, GraphError> {
        self.insert_node(id.into(), Some(label.into()), style)
    }

    fn insert_node(
        &mut self,
        id: String,
        label: Option<String>,
        style: NodeStyle,
    ) -> Result<NodeIndex, GraphError> {
        if self.node_indices.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }

        let idx = self.graph.add_node(Node {
            id: id.clone(),
            label,
            style,
        });
        self.node_indices.insert(id, idx);

        trace!(node_count = self.graph.node_count(); "Added node to graph");
        Ok(idx)
    }

    /// Adds an edge between two existing nodes.
    ///
    /// Parallel edges between the same pair and self-loops are permitted;
    /// each edge contributes its own spring force during layout.
    pub fn add_edge(
        &mut self,
        source: &str,
        target: &str,
        style: EdgeStyle,
    ) -> Result<EdgeIndex, GraphError> {
        let source_idx = self.index_of(source)?;
        let target_idx = self.index_of(target)?;

        let idx = self.graph.add_edge(source_idx, target_idx, style);
        trace!(edge_count = self.graph.edge_count(); "Added edge to graph");
        Ok(idx)
    }

    fn index_of(&self, id: &str) -> Result<NodeIndex, GraphError> {
        self.node_indices
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))
    }

    /// Returns the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges in the graph
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Reports whether any edge connects the two nodes.
    ///
    /// Directed graphs match the given orientation only; undirected graphs
    /// match either. Unknown ids report `false`.
    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        let (Some(&source_idx), Some(&target_idx)) = (
            self.node_indices.get(source),
            self.node_indices.get(target),
        ) else {
            return false;
        };

        if self.directed {
            self.graph.find_edge(source_idx, target_idx).is_some()
        } else {
            self.graph
                .find_edge_undirected(source_idx, target_idx)
                .is_some()
        }
    }

    /// Returns the weight of an edge between the two nodes, or `None` when
    /// no such edge exists. With parallel edges, any one of them answers.
    pub fn edge_weight(&self, source: &str, target: &str) -> Option<f32> {
        let source_idx = *self.node_indices.get(source)?;
        let target_idx = *self.node_indices.get(target)?;

        let edge_idx = if self.directed {
            self.graph.find_edge(source_idx, target_idx)
        } else {
            self.graph
                .find_edge_undirected(source_idx, target_idx)
                .map(|(idx, _)| idx)
        }?;
        Some(self.graph[edge_idx].weight())
    }

    /// Returns the distinct neighbors of a node, in edge insertion order.
    ///
    /// Directed graphs follow edge orientation; undirected graphs count both
    /// endpoints. A self-loop makes a node its own neighbor. Returns `None`
    /// for an unknown id.
    pub fn neighbors(&self, id: &str) -> Option<Vec<&Node>> {
        let idx = *self.node_indices.get(id)?;

        let mut adjacent: Vec<NodeIndex> = Vec::new();
        for (source, target, _) in self.edges() {
            let other = if source == idx {
                target
            } else if !self.directed && target == idx {
                source
            } else {
                continue;
            };
            if !adjacent.contains(&other) {
                adjacent.push(other);
            }
        }

        Some(adjacent.into_iter().map(|idx| &self.graph[idx]).collect())
    }

    /// Returns an iterator over all nodes with their indices, in insertion
    /// order.
    pub fn nodes_with_indices(&self) -> impl Iterator<Item = (NodeIndex, &Node)> {
        self.graph.node_indices().map(|idx| (idx, &self.graph[idx]))
    }

    /// Returns the node stored at the given index.
    ///
    /// # Panics
    /// Panics if the index did not come from this graph. Nodes are never
    /// removed, so indices returned by [`Graph::add_node`] stay valid.
    pub fn node_from_idx(&self, idx: NodeIndex) -> &Node {
        &self.graph[idx]
    }

    /// Looks up a node by id.
    pub fn node_by_id(&self, id: &str) -> Option<&Node> {
        self.node_indices.get(id).map(|&idx| &self.graph[idx])
    }

    /// Returns an iterator over all edges as (source, target, style) triples,
    /// in insertion order. Insertion order doubles as draw order, so z-order
    /// is deterministic.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, &EdgeStyle)> {
        self.graph.edge_indices().map(|idx| {
            let (source, target) = self
                .graph
                .edge_endpoints(idx)
                .expect("edge indices are never invalidated");
            (source, target, &self.graph[idx])
        })
    }
}
