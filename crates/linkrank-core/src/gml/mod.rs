//! Graph Modelling Language (GML) loader.
//!
//! # Overview
//!
//! Citation graphs arrive as GML files:
//!
//! ```text
//! graph [
//!   directed 1
//!   node [ id 1 label "Kleinberg 1999" ]
//!   node [ id 2 label "Page 1998" ]
//!   edge [ source 1 target 2 ]      # 1 cites 2
//! ]
//! ```
//!
//! Loading happens in two passes:
//!
//! ```text
//! source text
//!        ↓  lexer::Lexer          (tokens, line numbers)
//! Vec<GmlPair>
//!        ↓  parser::parse_document (balanced key/value tree)
//! GmlGraph
//!        ↓  GmlGraph::from_document (node/edge extraction)
//! ```
//!
//! Only the first top-level `graph` list is read. Inside it, `node` and
//! `edge` lists are extracted in file order; every other key (`directed`
//! excepted, which is recorded) is ignored, as are unknown keys inside
//! nodes and edges. A node without a `label` is labelled with its id.

pub mod lexer;
pub mod parser;

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, instrument, warn};

use crate::error::LoadError;
use parser::{GmlPair, GmlValue};

/// A `node [ ... ]` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GmlNode {
    pub id: i64,
    pub label: String,
}

/// An `edge [ ... ]` entry. Direction is `source → target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GmlEdge {
    pub source: i64,
    pub target: i64,
}

/// Nodes and edges of a GML graph, in file order.
///
/// Node ids are unique and every edge endpoint names an existing node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GmlGraph {
    pub nodes: Vec<GmlNode>,
    pub edges: Vec<GmlEdge>,
    /// Value of the `directed` key, when present.
    pub directed: Option<bool>,
}

impl GmlGraph {
    /// Extract a graph from a parsed document.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Structure`] when there is no `graph` list, a node
    /// lacks an integer `id`, an id repeats, or an edge endpoint is missing
    /// or names an unknown node.
    pub fn from_document(doc: &[GmlPair]) -> Result<Self, LoadError> {
        let mut graphs = doc.iter().filter(|p| p.key == "graph");
        let Some(graph) = graphs.next() else {
            return Err(LoadError::Structure(
                "no top-level `graph [ ... ]` list".to_string(),
            ));
        };
        if graphs.next().is_some() {
            warn!("file holds more than one `graph`; only the first is read");
        }
        let GmlValue::List(items) = &graph.value else {
            return Err(LoadError::Structure(format!(
                "`graph` on line {} must be a list, found {}",
                graph.line,
                graph.value.type_name()
            )));
        };

        let mut out = Self::default();
        let mut seen = HashSet::new();

        for item in items {
            match item.key.as_str() {
                "node" => {
                    let node = extract_node(item)?;
                    if !seen.insert(node.id) {
                        return Err(LoadError::Structure(format!(
                            "node id {} on line {} is already taken",
                            node.id, item.line
                        )));
                    }
                    out.nodes.push(node);
                }
                "edge" => out.edges.push(extract_edge(item)?),
                "directed" => out.directed = Some(matches!(item.value, GmlValue::Int(v) if v != 0)),
                other => debug!(key = other, line = item.line, "ignoring graph attribute"),
            }
        }

        // Edges may precede the nodes they reference, so check after the pass.
        for edge in &out.edges {
            for end in [edge.source, edge.target] {
                if !seen.contains(&end) {
                    return Err(LoadError::Structure(format!(
                        "edge {} -> {} references unknown node {end}",
                        edge.source, edge.target
                    )));
                }
            }
        }

        if out.directed == Some(false) {
            debug!("`directed 0` ignored; edges are read as citations");
        }

        Ok(out)
    }
}

/// Parse GML source text.
///
/// # Errors
///
/// Any [`LoadError`] other than the file-system variants.
pub fn parse_str(src: &str) -> Result<GmlGraph, LoadError> {
    let doc = parser::parse_document(src)?;
    GmlGraph::from_document(&doc)
}

/// Read and parse a GML file.
///
/// Files that are not valid UTF-8 are decoded as Latin-1, the encoding
/// most legacy GML exports use.
///
/// # Errors
///
/// [`LoadError::FileNotFound`] when `path` does not exist,
/// [`LoadError::Io`] when it cannot be read, otherwise as [`parse_str`].
#[instrument]
pub fn load_file(path: &Path) -> Result<GmlGraph, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::FileNotFound(path.to_path_buf())
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    parse_str(&decode(bytes))
}

/// UTF-8 if the bytes are valid UTF-8, Latin-1 otherwise.
fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(src) => src,
        Err(err) => {
            debug!(
                valid_up_to = err.utf8_error().valid_up_to(),
                "graph file is not UTF-8; decoding as Latin-1"
            );
            err.into_bytes().into_iter().map(char::from).collect()
        }
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn entries<'a>(pair: &'a GmlPair, what: &str) -> Result<&'a [GmlPair], LoadError> {
    match &pair.value {
        GmlValue::List(items) => Ok(items),
        other => Err(LoadError::Structure(format!(
            "`{what}` on line {} must be a list, found {}",
            pair.line,
            other.type_name()
        ))),
    }
}

fn int_field(items: &[GmlPair], key: &str, what: &str, line: usize) -> Result<i64, LoadError> {
    match items.iter().find(|p| p.key == key).map(|p| &p.value) {
        Some(GmlValue::Int(v)) => Ok(*v),
        Some(other) => Err(LoadError::Structure(format!(
            "`{key}` of {what} on line {line} must be an integer, found {}",
            other.type_name()
        ))),
        None => Err(LoadError::Structure(format!(
            "{what} on line {line} has no `{key}`"
        ))),
    }
}

fn extract_node(pair: &GmlPair) -> Result<GmlNode, LoadError> {
    let items = entries(pair, "node")?;
    let id = int_field(items, "id", "node", pair.line)?;
    let label = match items.iter().find(|p| p.key == "label").map(|p| &p.value) {
        Some(GmlValue::Str(s)) => s.clone(),
        Some(GmlValue::Int(v)) => v.to_string(),
        Some(GmlValue::Real(v)) => v.to_string(),
        Some(GmlValue::List(_)) => {
            return Err(LoadError::Structure(format!(
                "`label` of node {id} on line {} must be a string",
                pair.line
            )));
        }
        None => id.to_string(),
    };
    Ok(GmlNode { id, label })
}

fn extract_edge(pair: &GmlPair) -> Result<GmlEdge, LoadError> {
    let items = entries(pair, "edge")?;
    Ok(GmlEdge {
        source: int_field(items, "source", "edge", pair.line)?,
        target: int_field(items, "target", "edge", pair.line)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CITES: &str = r#"
Creator "test"
graph [
  directed 1
  node [ id 10 label "A" ]
  node [ id 20 label "B" x 1.5 ]
  node [ id 30 ]
  edge [ source 10 target 20 ]
  edge [ source 20 target 30 ]
  edge [ source 10 target 20 ]
]
"#;

    #[test]
    fn loads_nodes_edges_in_file_order() {
        let g = parse_str(CITES).expect("loads");
        let labels: Vec<_> = g.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, ["A", "B", "30"]);
        assert_eq!(g.edges.len(), 3, "parallel edges are kept");
        assert_eq!(g.edges[1], GmlEdge { source: 20, target: 30 });
        assert_eq!(g.directed, Some(true));
    }

    #[test]
    fn missing_graph_is_structural() {
        let err = parse_str("Creator \"x\"").expect_err("must fail");
        assert!(matches!(err, LoadError::Structure(_)));
    }

    #[test]
    fn duplicate_node_id_is_structural() {
        let err = parse_str("graph [ node [ id 1 ] node [ id 1 ] ]").expect_err("must fail");
        assert!(matches!(err, LoadError::Structure(_)));
    }

    #[test]
    fn node_without_id_is_structural() {
        let err = parse_str("graph [ node [ label \"x\" ] ]").expect_err("must fail");
        assert!(matches!(err, LoadError::Structure(_)));
    }

    #[test]
    fn edge_to_unknown_node_is_structural() {
        let err = parse_str("graph [ node [ id 1 ] edge [ source 1 target 2 ] ]")
            .expect_err("must fail");
        assert!(err.to_string().contains("unknown node 2"), "{err}");
    }

    #[test]
    fn edge_before_its_nodes_is_fine() {
        let g = parse_str("graph [ edge [ source 1 target 2 ] node [ id 1 ] node [ id 2 ] ]")
            .expect("loads");
        assert_eq!(g.edges.len(), 1);
    }

    #[test]
    fn edge_with_string_endpoint_is_structural() {
        let err = parse_str("graph [ node [ id 1 ] edge [ source \"1\" target 1 ] ]")
            .expect_err("must fail");
        assert!(matches!(err, LoadError::Structure(_)));
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_file(&dir.path().join("nope.gml")).expect_err("must fail");
        assert!(matches!(err, LoadError::FileNotFound(_)));
    }

    #[test]
    fn load_file_reads_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("g.gml");
        std::fs::write(&path, CITES).expect("write");
        let g = load_file(&path).expect("loads");
        assert_eq!(g.nodes.len(), 3);
    }
}
