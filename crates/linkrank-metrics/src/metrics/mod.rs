//! Link-analysis metrics for the citation graph.
//!
//! # Overview
//!
//! Two independent power-iteration solvers run over a [`CitationGraph`]:
//!
//! - **PageRank** (`pagerank`): one global importance score per document,
//!   using synchronous (Jacobi) updates over double-buffered score vectors.
//! - **HITS** (`hits`): an Authority and a Hub score per document, updated in
//!   two L2-normalized half-steps per iteration.
//!
//! Both take a fixed iteration count and, optionally, a tolerance for early
//! exit. Neither mutates the graph, so any number of solvers may borrow the
//! same graph at once.
//!
//! # Numeric degeneracy
//!
//! Divisions that the textbook formulas leave undefined are clamped to 0
//! instead of producing NaN: a document with no outgoing citations casts a
//! zero PageRank vote, and a HITS vector whose L2 norm is 0 stays all-zero.
//! Results carry counters so callers can tell when this happened.
//!
//! [`CitationGraph`]: crate::graph::CitationGraph

pub mod hits;
pub mod pagerank;

use std::ops::Index;

use petgraph::graph::NodeIndex;
use serde::Serialize;

/// One score per node, indexed by `NodeIndex::index()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScoreMap(Vec<f64>);

impl ScoreMap {
    /// A map with every node set to `value`.
    #[must_use]
    pub fn filled(len: usize, value: f64) -> Self {
        Self(vec![value; len])
    }

    #[must_use]
    pub fn get(&self, node: NodeIndex) -> Option<f64> {
        self.0.get(node.index()).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Scores in node order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, f64)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(i, &v)| (NodeIndex::new(i), v))
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    #[must_use]
    pub fn sum_of_squares(&self) -> f64 {
        self.0.iter().map(|x| x * x).sum()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for ScoreMap {
    fn from(v: Vec<f64>) -> Self {
        Self(v)
    }
}

impl Index<NodeIndex> for ScoreMap {
    type Output = f64;

    fn index(&self, node: NodeIndex) -> &f64 {
        &self.0[node.index()]
    }
}

/// Scale `v` to unit L2 norm.
///
/// Returns `false`, leaving `v` untouched, when the norm is 0 (or not
/// finite), which keeps an all-zero vector all-zero instead of NaN.
pub(crate) fn normalize_l2(v: &mut [f64]) -> bool {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 && norm.is_finite() {
        for x in v.iter_mut() {
            *x /= norm;
        }
        true
    } else {
        false
    }
}

/// Largest absolute per-node difference between two equal-length vectors.
pub(crate) fn max_abs_delta(old: &[f64], new: &[f64]) -> f64 {
    old.iter()
        .zip(new)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0_f64, f64::max)
}
