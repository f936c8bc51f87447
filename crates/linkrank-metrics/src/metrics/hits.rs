//! HITS (Hyperlink-Induced Topic Search) algorithm.
//!
//! # Overview
//!
//! HITS computes two scores for each document:
//!
//! - **Authority score**: how much a document is cited by good hubs.
//!   Foundational papers score high.
//! - **Hub score**: how much a document cites good authorities. Surveys and
//!   well-researched related-work sections score high.
//!
//! # Algorithm
//!
//! Iterative power method (Kleinberg, 1999). Both vectors start at 1.0, then
//! each iteration runs two half-steps in order:
//!
//! 1. Authority update: `auth(p) = Σ hub(q)` over citations `q → p`, using
//!    the hub vector from the previous iteration; then L2-normalize.
//! 2. Hub update: `hub(p) = Σ auth(q)` over citations `p → q`, using the
//!    authority vector just normalized in step 1; then L2-normalize.
//!
//! Step 2 depends on step 1 of the same iteration, so the half-steps cannot
//! be reordered or overlapped.
//!
//! # Zero norm
//!
//! A vector whose sum of squares is 0 (no edges at all, or every score 0) is
//! left all-zero rather than divided by zero. Each such half-step is counted
//! in [`HitsResult::degenerate_steps`].
//!
//! # Zero iterations
//!
//! With `iterations == 0` both vectors are returned at their initial 1.0,
//! not normalized.

use tracing::{debug, instrument, trace, warn};

use linkrank_core::config::{HitsSettings, validate_tolerance};
use linkrank_core::error::ConfigError;

use crate::graph::CitationGraph;
use crate::metrics::{ScoreMap, max_abs_delta, normalize_l2};

/// Configuration for HITS computation.
#[derive(Debug, Clone, PartialEq)]
pub struct HitsConfig {
    /// Number of iterations, or the cap when `tolerance` is set.
    /// Default: 20.
    pub iterations: usize,
    /// Early-exit threshold on the max per-node change across both vectors.
    /// Default: `None`.
    pub tolerance: Option<f64>,
}

impl Default for HitsConfig {
    fn default() -> Self {
        Self {
            iterations: 20,
            tolerance: None,
        }
    }
}

impl From<&HitsSettings> for HitsConfig {
    fn from(s: &HitsSettings) -> Self {
        Self {
            iterations: s.iterations,
            tolerance: s.tolerance,
        }
    }
}

impl HitsConfig {
    /// # Errors
    ///
    /// [`ConfigError::Tolerance`] for a non-positive or non-finite tolerance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(t) = self.tolerance {
            validate_tolerance(t)?;
        }
        Ok(())
    }
}

/// Result of the HITS algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct HitsResult {
    /// Authority scores, unit L2 norm unless degenerate.
    pub authority: ScoreMap,
    /// Hub scores, unit L2 norm unless degenerate.
    pub hub: ScoreMap,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether a tolerance was set and reached.
    pub converged: bool,
    /// Largest per-node change over both vectors in the final iteration.
    pub last_delta: f64,
    /// Half-steps whose vector had zero norm and was left all-zero.
    pub degenerate_steps: usize,
}

/// Compute HITS authority and hub scores over `g`.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count(), edges = g.edge_count()))]
pub fn hits(g: &CitationGraph, config: &HitsConfig) -> HitsResult {
    let n = g.node_count();

    let mut auth = vec![1.0_f64; n];
    let mut hub = vec![1.0_f64; n];
    let mut new_auth = vec![0.0_f64; n];
    let mut new_hub = vec![0.0_f64; n];

    let mut iterations = 0;
    let mut converged = false;
    let mut last_delta = 0.0_f64;
    let mut degenerate_steps = 0;

    for iter in 0..config.iterations {
        // Authority update: auth(p) = sum of hub(q) for all q → p
        for p in g.nodes() {
            new_auth[p.index()] = g
                .in_edges(p)
                .map(|e| hub[CitationGraph::opposite(e, p).index()])
                .sum();
        }
        if !normalize_l2(&mut new_auth) {
            degenerate_steps += 1;
        }

        // Hub update: hub(p) = sum of auth(q) for all p → q, reading the
        // authority vector normalized just above.
        for p in g.nodes() {
            new_hub[p.index()] = g
                .out_edges(p)
                .map(|e| new_auth[CitationGraph::opposite(e, p).index()])
                .sum();
        }
        if !normalize_l2(&mut new_hub) {
            degenerate_steps += 1;
        }

        last_delta = max_abs_delta(&auth, &new_auth).max(max_abs_delta(&hub, &new_hub));
        std::mem::swap(&mut auth, &mut new_auth);
        std::mem::swap(&mut hub, &mut new_hub);
        iterations = iter + 1;
        trace!(iteration = iterations, delta = last_delta, "hits pass");

        if config.tolerance.is_some_and(|t| last_delta < t) {
            converged = true;
            break;
        }
    }

    if degenerate_steps > 0 && n > 0 {
        warn!(
            degenerate_steps,
            "HITS vector had zero norm; scores clamped to 0"
        );
    }
    debug!(iterations, converged, last_delta, "hits finished");

    HitsResult {
        authority: ScoreMap::from(auth),
        hub: ScoreMap::from(hub),
        iterations,
        converged,
        last_delta,
        degenerate_steps,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
