//! Citation graph module.
//!
//! # Overview
//!
//! Builds the petgraph-backed directed graph the solvers run on. An edge
//! `A → B` means "A cites B".
//!
//! ## Pipeline
//!
//! ```text
//! .gml file
//!        ↓  linkrank_core::gml::load_file()
//! GmlGraph (ids, labels, edges in file order)
//!        ↓  build::CitationGraph::from_gml()
//! CitationGraph (immutable DiGraph, dense node indices)
//!        ↓  stats::GraphStats::from_graph()
//! GraphStats (dangling, isolated, density, …)
//! ```
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use linkrank_metrics::graph::{CitationGraph, GraphStats};
//!
//! let graph = CitationGraph::load(Path::new("papers.gml"))?;
//! let stats = GraphStats::from_graph(&graph);
//! println!("nodes={} edges={} dangling={}",
//!     stats.node_count, stats.edge_count, stats.dangling_count);
//! ```

pub mod build;
pub mod stats;

pub use build::CitationGraph;
pub use stats::GraphStats;
