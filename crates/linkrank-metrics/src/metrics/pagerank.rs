//! PageRank by damped power iteration.
//!
//! # Overview
//!
//! PageRank scores a document by how likely a random reader, following
//! citations and occasionally jumping to a random document, is to be reading
//! it. Papers cited by well-cited papers score high.
//!
//! # Algorithm
//!
//! Starting from all-zero ranks, every iteration computes, for each node `p`:
//!
//! ```text
//! PR(p) = (1 - d) + d * Σ PR_old(q) / out_degree(q)   for each edge q → p
//! ```
//!
//! where `d` is the damping factor (default 0.85). The update is synchronous:
//! all new ranks are computed from the previous iteration's vector into a
//! second buffer, then the buffers are swapped. No node ever reads a value
//! written earlier in the same pass.
//!
//! The formula is not normalized by `N`, so ranks do not sum to 1; on a graph
//! where every node cites something they converge towards a mean of 1.0. Use
//! [`PageRankResult::normalized`] for a probability distribution.
//!
//! # Dangling nodes
//!
//! A document that cites nothing has no outgoing edge to split its rank over.
//! It casts a zero vote; its rank is not redistributed. Ranks then sum to
//! less than `N`.
//!
//! # Termination
//!
//! Exactly `iterations` passes by default. With a `tolerance`, the solver
//! stops after the first pass whose largest per-node change is below it.

use tracing::{debug, instrument, trace};

use linkrank_core::config::{PageRankSettings, validate_damping, validate_tolerance};
use linkrank_core::error::ConfigError;

use crate::graph::CitationGraph;
use crate::metrics::{ScoreMap, max_abs_delta};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for PageRank computation.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRankConfig {
    /// Damping factor (probability of following a citation vs jumping).
    /// Default: 0.85.
    pub damping: f64,
    /// Number of iterations, or the cap when `tolerance` is set.
    /// Default: 40.
    pub iterations: usize,
    /// Early-exit threshold on the max per-node change. Default: `None`.
    pub tolerance: Option<f64>,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            iterations: 40,
            tolerance: None,
        }
    }
}

impl From<&PageRankSettings> for PageRankConfig {
    fn from(s: &PageRankSettings) -> Self {
        Self {
            damping: s.damping,
            iterations: s.iterations,
            tolerance: s.tolerance,
        }
    }
}

impl PageRankConfig {
    /// # Errors
    ///
    /// [`ConfigError::Damping`] or [`ConfigError::Tolerance`] for values
    /// outside their ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_damping(self.damping)?;
        if let Some(t) = self.tolerance {
            validate_tolerance(t)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Result of a PageRank computation.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRankResult {
    /// Rank per node.
    pub scores: ScoreMap,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether a tolerance was set and reached.
    pub converged: bool,
    /// Largest per-node change in the final iteration (0.0 if none ran).
    pub last_delta: f64,
    /// Nodes with out-degree 0, which cast no vote.
    pub dangling: usize,
}

impl PageRankResult {
    /// Scores divided by their sum. An all-zero vector is returned as-is.
    #[must_use]
    pub fn normalized(&self) -> ScoreMap {
        let total = self.scores.sum();
        if total > 0.0 {
            ScoreMap::from(
                self.scores
                    .as_slice()
                    .iter()
                    .map(|x| x / total)
                    .collect::<Vec<_>>(),
            )
        } else {
            self.scores.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// Solver
// ---------------------------------------------------------------------------

/// Compute PageRank over `g`.
///
/// `config` is not validated here; call [`PageRankConfig::validate`] first
/// when it comes from user input.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count(), edges = g.edge_count()))]
pub fn pagerank(g: &CitationGraph, config: &PageRankConfig) -> PageRankResult {
    let n = g.node_count();
    let damping = config.damping;
    let teleport = 1.0 - damping;

    // Share of a node's rank carried by each of its outgoing edges.
    let mut dangling = 0;
    let vote_weight: Vec<f64> = g
        .nodes()
        .map(|q| match g.out_degree(q) {
            0 => {
                dangling += 1;
                0.0
            }
            #[allow(clippy::cast_precision_loss)]
            d => 1.0 / d as f64,
        })
        .collect();
    if dangling > 0 {
        debug!(dangling, "nodes without outgoing citations cast no vote");
    }

    let mut ranks = vec![0.0_f64; n];
    let mut next = vec![0.0_f64; n];
    let mut iterations = 0;
    let mut converged = false;
    let mut last_delta = 0.0_f64;

    for iter in 0..config.iterations {
        for p in g.nodes() {
            let vote: f64 = g
                .in_edges(p)
                .map(|e| {
                    let q = CitationGraph::opposite(e, p).index();
                    ranks[q] * vote_weight[q]
                })
                .sum();
            next[p.index()] = teleport + damping * vote;
        }

        last_delta = max_abs_delta(&ranks, &next);
        std::mem::swap(&mut ranks, &mut next);
        iterations = iter + 1;
        trace!(iteration = iterations, delta = last_delta, "pagerank pass");

        if config.tolerance.is_some_and(|t| last_delta < t) {
            converged = true;
            break;
        }
    }

    debug!(iterations, converged, last_delta, "pagerank finished");

    PageRankResult {
        scores: ScoreMap::from(ranks),
        iterations,
        converged,
        last_delta,
        dangling,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
