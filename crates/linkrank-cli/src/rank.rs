//! `linkrank FILE`: load a citation graph and print its scores.

use anyhow::Context as _;
use clap::{Args, ValueEnum};
use linkrank_core::config::{ConfigLayer, HitsLayer, OutputLayer, PageRankLayer, resolve_config};
use linkrank_core::{Algorithm, LinkrankConfig};
use linkrank_metrics::{
    CitationGraph, GraphStats, HitsConfig, PageRankConfig, ScoreTable, hits, pagerank,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::output::{self, OutputMode};

/// Which solver(s) to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    Pagerank,
    Hits,
    Both,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Pagerank => Self::PageRank,
            AlgorithmArg::Hits => Self::Hits,
            AlgorithmArg::Both => Self::Both,
        }
    }
}

#[derive(Args, Debug)]
pub struct RankArgs {
    /// GML file describing the citation graph.
    pub graph: PathBuf,

    /// Solver to run.
    #[arg(short, long, value_enum)]
    pub algorithm: Option<AlgorithmArg>,

    /// PageRank damping factor in [0, 1].
    #[arg(short, long)]
    pub damping: Option<f64>,

    /// Iteration count, or the cap when --tolerance is set.
    #[arg(short = 'k', long)]
    pub iterations: Option<usize>,

    /// Stop early once no score moves by more than this.
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Digits after the decimal point in text and pretty output.
    #[arg(short, long)]
    pub precision: Option<usize>,

    /// Config file to use instead of ./linkrank.toml.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl RankArgs {
    /// The highest-precedence config layer: whatever was given on the command line.
    fn layer(&self) -> ConfigLayer {
        ConfigLayer {
            algorithm: self.algorithm.map(Algorithm::from),
            pagerank: PageRankLayer {
                damping: self.damping,
                iterations: self.iterations,
                tolerance: self.tolerance,
            },
            hits: HitsLayer {
                iterations: self.iterations,
                tolerance: self.tolerance,
            },
            output: OutputLayer {
                precision: self.precision,
            },
        }
    }

    fn resolve(&self, project_root: &Path) -> anyhow::Result<LinkrankConfig> {
        let mut config = resolve_config(project_root, self.config.as_deref())?;
        config.apply(&self.layer());
        config.validate()?;
        Ok(config)
    }
}

/// Score `graph` with the configured solver(s).
#[must_use]
pub fn score(graph: &CitationGraph, config: &LinkrankConfig) -> ScoreTable {
    let run_pagerank = || pagerank(graph, &PageRankConfig::from(&config.pagerank));
    let run_hits = || hits(graph, &HitsConfig::from(&config.hits));

    match config.algorithm {
        Algorithm::PageRank => ScoreTable::pagerank(graph, &run_pagerank()),
        Algorithm::Hits => ScoreTable::hits(graph, &run_hits()),
        Algorithm::Both => ScoreTable::combined(graph, &run_pagerank(), &run_hits()),
    }
}

pub fn run_rank(args: &RankArgs, mode: OutputMode, w: &mut dyn Write) -> anyhow::Result<()> {
    let project_root = std::env::current_dir().context("reading current directory")?;
    let config = args.resolve(&project_root)?;

    let graph = CitationGraph::load(&args.graph)
        .with_context(|| format!("loading graph {}", args.graph.display()))?;

    let stats = GraphStats::from_graph(&graph);
    info!(
        path = %args.graph.display(),
        nodes = stats.node_count,
        edges = stats.edge_count,
        dangling = stats.dangling_count,
        isolated = stats.isolated_count,
        components = stats.weakly_connected_component_count,
        "graph loaded"
    );
    if stats.is_flat() {
        warn!("graph has no edges; every node will score the same");
    }

    let table = score(&graph, &config);
    output::render_table(w, &table, mode, config.output.precision)?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> RankArgs {
        #[derive(clap::Parser)]
        struct Wrapper {
            #[command(flatten)]
            rank: RankArgs,
        }
        let argv = std::iter::once("linkrank").chain(extra.iter().copied());
        <Wrapper as clap::Parser>::parse_from(argv).rank
    }

    fn triangle() -> CitationGraph {
        CitationGraph::from_edges(&["A", "B", "C"], &[(0, 1), (1, 2), (2, 0)]).expect("valid")
    }

    #[test]
    fn cli_flags_become_the_top_layer() {
        let a = args(&["-a", "both", "-d", "0.5", "-k", "7", "-p", "3", "g.gml"]);
        let mut config = LinkrankConfig::default();
        config.apply(&a.layer());
        assert_eq!(config.algorithm, Algorithm::Both);
        assert!((config.pagerank.damping - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.pagerank.iterations, 7);
        assert_eq!(config.hits.iterations, 7);
        assert_eq!(config.output.precision, 3);
    }

    #[test]
    fn absent_flags_leave_config_untouched() {
        let a = args(&["g.gml"]);
        let mut config = LinkrankConfig::default();
        config.apply(&a.layer());
        assert_eq!(config, LinkrankConfig::default());
    }

    #[test]
    fn out_of_range_damping_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let a = args(&["-d", "1.5", "g.gml"]);
        let err = a.resolve(dir.path()).expect_err("damping out of range");
        assert!(err.to_string().contains("damping"), "{err}");
    }

    #[test]
    fn score_columns_follow_algorithm() {
        let g = triangle();
        let mut config = LinkrankConfig::default();
        assert_eq!(score(&g, &config).columns, ["Node", "Page rank"]);

        config.algorithm = Algorithm::Hits;
        assert_eq!(score(&g, &config).columns, ["Node", "Authority", "Hub"]);

        config.algorithm = Algorithm::Both;
        assert_eq!(
            score(&g, &config).columns,
            ["Node", "Page rank", "Authority", "Hub"]
        );
    }
}
