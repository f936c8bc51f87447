//! Citation graph construction.
//!
//! # Overview
//!
//! [`CitationGraph`] wraps a [`petgraph`] `DiGraph<String, ()>` whose node
//! weights are document labels. It is built once and has no mutating API,
//! so solvers can hold `&CitationGraph` while they iterate.
//!
//! ## Node Order
//!
//! Nodes are inserted in load order, which makes `NodeIndex::index()` a dense
//! `0..n` key for score vectors and makes every iteration over the graph
//! deterministic across runs.
//!
//! ## Edges
//!
//! An edge `A → B` means "A cites B". Parallel edges are kept and counted
//! separately; self-citations are kept too.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;
use std::path::Path;

use linkrank_core::{GmlGraph, LoadError, gml};
use petgraph::{
    Direction,
    graph::{DiGraph, EdgeReference, NodeIndex},
    visit::EdgeRef,
};
use tracing::instrument;

// ---------------------------------------------------------------------------
// CitationGraph
// ---------------------------------------------------------------------------

/// An immutable directed citation graph.
#[derive(Debug, Clone)]
pub struct CitationGraph {
    graph: DiGraph<String, ()>,
    /// Out-degree per node, indexed by `NodeIndex::index()`.
    out_degrees: Vec<usize>,
}

impl CitationGraph {
    fn from_petgraph(graph: DiGraph<String, ()>) -> Self {
        let out_degrees = graph
            .node_indices()
            .map(|n| graph.edges_directed(n, Direction::Outgoing).count())
            .collect();
        Self { graph, out_degrees }
    }

    /// Build from a parsed GML document, keeping file order for nodes and
    /// edges.
    ///
    /// # Errors
    ///
    /// [`LoadError::Structure`] if an edge names an id with no node.
    pub fn from_gml(doc: &GmlGraph) -> Result<Self, LoadError> {
        let mut graph = DiGraph::with_capacity(doc.nodes.len(), doc.edges.len());
        let mut by_id: HashMap<i64, NodeIndex> = HashMap::with_capacity(doc.nodes.len());

        for node in &doc.nodes {
            let idx = graph.add_node(node.label.clone());
            by_id.insert(node.id, idx);
        }

        for edge in &doc.edges {
            let lookup = |id: i64| {
                by_id.get(&id).copied().ok_or_else(|| {
                    LoadError::Structure(format!(
                        "edge {} -> {} references unknown node {id}",
                        edge.source, edge.target
                    ))
                })
            };
            let source = lookup(edge.source)?;
            let target = lookup(edge.target)?;
            graph.add_edge(source, target, ());
        }

        Ok(Self::from_petgraph(graph))
    }

    /// Build from labels (node `i` gets `labels[i]`) and `(source, target)`
    /// index pairs.
    ///
    /// # Errors
    ///
    /// [`LoadError::Structure`] if an index is out of range.
    pub fn from_edges<S: AsRef<str>>(
        labels: &[S],
        edges: &[(usize, usize)],
    ) -> Result<Self, LoadError> {
        let mut graph = DiGraph::with_capacity(labels.len(), edges.len());
        for label in labels {
            graph.add_node(label.as_ref().to_string());
        }
        for &(source, target) in edges {
            let end = source.max(target);
            if end >= labels.len() {
                return Err(LoadError::Structure(format!(
                    "edge {source} -> {target} references node {end}, but only {} exist",
                    labels.len()
                )));
            }
            graph.add_edge(NodeIndex::new(source), NodeIndex::new(target), ());
        }
        Ok(Self::from_petgraph(graph))
    }

    /// Read a GML file and build the graph.
    ///
    /// # Errors
    ///
    /// Any [`LoadError`] from reading or parsing the file.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let doc = gml::load_file(path)?;
        Self::from_gml(&doc)
    }

    /// Return the number of nodes (documents) in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of edges (citations) in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All nodes in load order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }

    /// Edges ending at `node` (documents citing it).
    pub fn in_edges(&self, node: NodeIndex) -> impl Iterator<Item = EdgeReference<'_, ()>> {
        self.graph.edges_directed(node, Direction::Incoming)
    }

    /// Edges starting at `node` (documents it cites).
    pub fn out_edges(&self, node: NodeIndex) -> impl Iterator<Item = EdgeReference<'_, ()>> {
        self.graph.edges_directed(node, Direction::Outgoing)
    }

    /// The endpoint of `edge` that is not `node`. For a self-loop that is
    /// `node` itself.
    #[must_use]
    pub fn opposite(edge: EdgeReference<'_, ()>, node: NodeIndex) -> NodeIndex {
        if edge.source() == node {
            edge.target()
        } else {
            edge.source()
        }
    }

    /// Number of outgoing edges of `node`; 0 for an unknown index.
    #[must_use]
    pub fn out_degree(&self, node: NodeIndex) -> usize {
        self.out_degrees.get(node.index()).copied().unwrap_or(0)
    }

    /// Number of incoming edges of `node`.
    #[must_use]
    pub fn in_degree(&self, node: NodeIndex) -> usize {
        self.in_edges(node).count()
    }

    /// Return the label of a node.
    #[must_use]
    pub fn label(&self, node: NodeIndex) -> Option<&str> {
        self.graph.node_weight(node).map(String::as_str)
    }

    /// `(node, label)` pairs in load order.
    pub fn labels(&self) -> impl Iterator<Item = (NodeIndex, &str)> {
        self.graph
            .node_indices()
            .map(move |n| (n, self.graph[n].as_str()))
    }

    /// First node carrying `label`. Labels are not required to be unique.
    #[must_use]
    pub fn find(&self, label: &str) -> Option<NodeIndex> {
        self.labels().find(|(_, l)| *l == label).map(|(n, _)| n)
    }

    /// Read-only view of the underlying petgraph graph.
    #[must_use]
    pub const fn petgraph(&self) -> &DiGraph<String, ()> {
        &self.graph
    }
}
