#![forbid(unsafe_code)]
//! linkrank-metrics library.
//!
//! Link analysis over a citation graph: the immutable [`graph::CitationGraph`]
//! model, the PageRank and HITS power-iteration solvers in [`metrics`], and
//! the ordered [`report::ScoreTable`] handed to whatever prints results.
//!
//! # Conventions
//!
//! - **Errors**: loading returns [`linkrank_core::LoadError`]; solvers are
//!   total functions and never fail.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).

pub mod graph;
pub mod metrics;
pub mod report;

pub use graph::{CitationGraph, GraphStats};
pub use metrics::{
    ScoreMap,
    hits::{HitsConfig, HitsResult, hits},
    pagerank::{PageRankConfig, PageRankResult, pagerank},
};
pub use report::{ScoreRow, ScoreTable};
