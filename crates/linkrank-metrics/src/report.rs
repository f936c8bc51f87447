//! Ordered per-node score tables.
//!
//! A [`ScoreTable`] pairs each node label with its score(s), in graph load
//! order, so output is reproducible run to run. Formatting is left to the
//! caller; the table only fixes row order and column names.

use serde::Serialize;

use petgraph::graph::NodeIndex;

use crate::graph::CitationGraph;
use crate::metrics::{ScoreMap, hits::HitsResult, pagerank::PageRankResult};

pub const NODE_COLUMN: &str = "Node";
pub const PAGERANK_COLUMN: &str = "Page rank";
pub const AUTHORITY_COLUMN: &str = "Authority";
pub const HUB_COLUMN: &str = "Hub";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRow {
    pub label: String,
    pub scores: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreTable {
    /// Header names; the first is always [`NODE_COLUMN`].
    pub columns: Vec<String>,
    pub rows: Vec<ScoreRow>,
}

impl ScoreTable {
    /// `Node`, `Page rank`.
    ///
    /// Nodes the result has no score for (a result computed on another
    /// graph) get `NaN`. The same holds for [`Self::hits`] and
    /// [`Self::combined`].
    #[must_use]
    pub fn pagerank(g: &CitationGraph, result: &PageRankResult) -> Self {
        Self::build(g, &[PAGERANK_COLUMN], |n| vec![score_of(&result.scores, n)])
    }

    /// `Node`, `Authority`, `Hub`.
    #[must_use]
    pub fn hits(g: &CitationGraph, result: &HitsResult) -> Self {
        Self::build(g, &[AUTHORITY_COLUMN, HUB_COLUMN], |n| {
            vec![score_of(&result.authority, n), score_of(&result.hub, n)]
        })
    }

    /// `Node`, `Page rank`, `Authority`, `Hub`.
    #[must_use]
    pub fn combined(g: &CitationGraph, pr: &PageRankResult, hits: &HitsResult) -> Self {
        Self::build(g, &[PAGERANK_COLUMN, AUTHORITY_COLUMN, HUB_COLUMN], |n| {
            vec![
                score_of(&pr.scores, n),
                score_of(&hits.authority, n),
                score_of(&hits.hub, n),
            ]
        })
    }

    fn build(
        g: &CitationGraph,
        score_columns: &[&str],
        scores: impl Fn(NodeIndex) -> Vec<f64>,
    ) -> Self {
        let columns = std::iter::once(NODE_COLUMN)
            .chain(score_columns.iter().copied())
            .map(str::to_string)
            .collect();
        let rows = g
            .labels()
            .map(|(n, label)| ScoreRow {
                label: label.to_string(),
                scores: scores(n),
            })
            .collect();
        Self { columns, rows }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows sorted by the score in `column` (0 = first score column),
    /// highest first; ties keep load order.
    #[must_use]
    pub fn ranked_by(&self, column: usize) -> Vec<&ScoreRow> {
        let mut rows: Vec<&ScoreRow> = self.rows.iter().collect();
        rows.sort_by(|a, b| {
            let a = a.scores.get(column).copied().unwrap_or(f64::NEG_INFINITY);
            let b = b.scores.get(column).copied().unwrap_or(f64::NEG_INFINITY);
            b.total_cmp(&a)
        });
        rows
    }
}

fn score_of(scores: &ScoreMap, n: NodeIndex) -> f64 {
    scores.get(n).unwrap_or(f64::NAN)
}
