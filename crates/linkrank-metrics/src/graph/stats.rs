//! Basic statistics for a citation graph.
//!
//! # Statistics Provided
//!
//! - **node_count** / **edge_count**: size of the graph.
//! - **density**: `edge_count / (node_count * (node_count - 1))`; 0.0 for
//!   graphs with fewer than two nodes. Parallel edges and self-loops can
//!   push it above 1.0.
//! - **dangling_count**: nodes that cite nothing (out-degree 0). They pass
//!   no PageRank vote on.
//! - **isolated_count**: nodes with no edges at all.
//! - **self_loop_count**: self-citations.
//! - **weakly_connected_component_count**: disjoint pieces of the graph.
//! - **max_in_degree** / **max_out_degree**: most-cited and most-citing
//!   documents.

use petgraph::{algo::connected_components, visit::EdgeRef};

use crate::graph::build::CitationGraph;

/// Summary statistics for a citation graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub dangling_count: usize,
    pub isolated_count: usize,
    pub self_loop_count: usize,
    pub weakly_connected_component_count: usize,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
}

impl GraphStats {
    #[must_use]
    pub fn from_graph(g: &CitationGraph) -> Self {
        let node_count = g.node_count();
        let edge_count = g.edge_count();

        let mut dangling_count = 0;
        let mut isolated_count = 0;
        let mut max_in_degree = 0;
        let mut max_out_degree = 0;

        for n in g.nodes() {
            let out = g.out_degree(n);
            let inc = g.in_degree(n);
            if out == 0 {
                dangling_count += 1;
                if inc == 0 {
                    isolated_count += 1;
                }
            }
            max_in_degree = max_in_degree.max(inc);
            max_out_degree = max_out_degree.max(out);
        }

        let self_loop_count = g
            .petgraph()
            .edge_references()
            .filter(|e| e.source() == e.target())
            .count();

        Self {
            node_count,
            edge_count,
            density: compute_density(node_count, edge_count),
            dangling_count,
            isolated_count,
            self_loop_count,
            weakly_connected_component_count: connected_components(g.petgraph()),
            max_in_degree,
            max_out_degree,
        }
    }

    /// Return `true` if the graph has no citations.
    #[must_use]
    pub const fn is_flat(&self) -> bool {
        self.edge_count == 0
    }
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0_f64;
    }
    let max_edges = (node_count * (node_count - 1)) as f64;
    edge_count as f64 / max_edges
}
