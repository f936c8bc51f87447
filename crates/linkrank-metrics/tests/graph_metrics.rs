//! Known-topology regression tests for the link-analysis solvers.
//!
//! Each test uses a hand-crafted graph whose scores can be worked out by
//! hand, so any change to the update rules shows up here.

use petgraph::graph::NodeIndex;

use linkrank_core::gml::parse_str;
use linkrank_metrics::graph::{CitationGraph, GraphStats};
use linkrank_metrics::metrics::hits::{HitsConfig, hits};
use linkrank_metrics::metrics::pagerank::{PageRankConfig, pagerank};
use linkrank_metrics::report::ScoreTable;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build_graph(labels: &[&str], edges: &[(usize, usize)]) -> CitationGraph {
    CitationGraph::from_edges(labels, edges).expect("valid graph")
}

/// Same edges in both directions.
fn mirrored(labels: &[&str], edges: &[(usize, usize)]) -> CitationGraph {
    let both: Vec<_> = edges.iter().flat_map(|&(a, b)| [(a, b), (b, a)]).collect();
    build_graph(labels, &both)
}

fn pr_config(iterations: usize) -> PageRankConfig {
    PageRankConfig {
        iterations,
        ..PageRankConfig::default()
    }
}

fn hits_config(iterations: usize) -> HitsConfig {
    HitsConfig {
        iterations,
        tolerance: None,
    }
}

// ---------------------------------------------------------------------------
// PageRank
// ---------------------------------------------------------------------------

#[test]
fn three_cycle_one_iteration_is_015_everywhere() {
    let g = build_graph(&["A", "B", "C"], &[(0, 1), (1, 2), (2, 0)]);
    let config = PageRankConfig {
        damping: 0.85,
        iterations: 1,
        tolerance: None,
    };
    let r = pagerank(&g, &config);
    for (_, v) in r.scores.iter() {
        assert!((v - 0.15).abs() < 1e-12, "got {v}");
    }
}

#[test]
fn three_cycle_many_iterations_is_one_third_each() {
    let g = build_graph(&["A", "B", "C"], &[(0, 1), (1, 2), (2, 0)]);
    let r = pagerank(&g, &pr_config(300));
    for (_, share) in r.normalized().iter() {
        assert!((share - 1.0 / 3.0).abs() < 1e-9, "got {share}");
    }
}

#[test]
fn default_run_is_exactly_forty_iterations() {
    let g = build_graph(&["A", "B"], &[(0, 1), (1, 0)]);
    let r = pagerank(&g, &PageRankConfig::default());
    assert_eq!(r.iterations, 40);
    assert!(!r.converged);
}

#[test]
fn two_isolated_nodes_get_one_minus_d() {
    let g = build_graph(&["A", "B"], &[]);
    for d in [0.5, 0.85, 0.99] {
        let config = PageRankConfig {
            damping: d,
            ..PageRankConfig::default()
        };
        let r = pagerank(&g, &config);
        for (_, v) in r.scores.iter() {
            assert!((v - (1.0 - d)).abs() < 1e-12);
        }
    }
}

#[test]
fn most_cited_paper_ranks_first() {
    // Survey S cites everything; everything cites the classic K.
    let labels = ["K", "P1", "P2", "P3", "S"];
    let edges = [(1, 0), (2, 0), (3, 0), (4, 0), (4, 1), (4, 2), (4, 3)];
    let g = build_graph(&labels, &edges);
    let r = pagerank(&g, &PageRankConfig::default());
    let table = ScoreTable::pagerank(&g, &r);
    assert_eq!(table.ranked_by(0)[0].label, "K");
}

// ---------------------------------------------------------------------------
// HITS
// ---------------------------------------------------------------------------

#[test]
fn hits_survey_is_hub_classic_is_authority() {
    let labels = ["K", "P1", "P2", "P3", "S"];
    let edges = [(1, 0), (2, 0), (3, 0), (4, 0), (4, 1), (4, 2), (4, 3)];
    let g = build_graph(&labels, &edges);
    let r = hits(&g, &HitsConfig::default());
    let table = ScoreTable::hits(&g, &r);
    assert_eq!(table.ranked_by(0)[0].label, "K", "top authority");
    assert_eq!(table.ranked_by(1)[0].label, "S", "top hub");
}

#[test]
fn hits_two_isolated_nodes_are_zero_not_nan() {
    let g = build_graph(&["A", "B"], &[]);
    let r = hits(&g, &HitsConfig::default());
    for (_, v) in r.authority.iter().chain(r.hub.iter()) {
        assert!(v == 0.0, "got {v}");
    }
}

#[test]
fn hits_vectors_have_unit_norm_after_each_iteration() {
    let g = build_graph(&["A", "B", "C", "D"], &[(0, 1), (1, 2), (2, 0), (3, 0)]);
    for k in 1..10 {
        let r = hits(&g, &hits_config(k));
        assert!((r.authority.sum_of_squares() - 1.0).abs() < 1e-9, "k={k}");
        assert!((r.hub.sum_of_squares() - 1.0).abs() < 1e-9, "k={k}");
    }
}

#[test]
fn hits_zero_iterations_is_initial_state() {
    let g = build_graph(&["A", "B"], &[(0, 1)]);
    let r = hits(&g, &hits_config(0));
    assert_eq!(r.authority.as_slice(), &[1.0, 1.0]);
    assert_eq!(r.hub.as_slice(), &[1.0, 1.0]);
}

#[test]
fn mirrored_graphs_have_equal_authority_and_hub() {
    let cases: &[(&[&str], &[(usize, usize)])] = &[
        // Triangle with a pendant.
        (&["A", "B", "C", "D"], &[(0, 1), (1, 2), (2, 0), (2, 3)]),
        // K4.
        (
            &["A", "B", "C", "D"],
            &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)],
        ),
        // Two triangles sharing a node.
        (
            &["A", "B", "C", "D", "E"],
            &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2)],
        ),
    ];
    for (labels, edges) in cases {
        let g = mirrored(labels, edges);
        let r = hits(&g, &hits_config(200));
        for n in g.nodes() {
            let a = r.authority[n];
            let h = r.hub[n];
            assert!((a - h).abs() < 1e-9, "{:?}: auth={a} hub={h}", g.label(n));
        }
    }
}

// ---------------------------------------------------------------------------
// From GML to table
// ---------------------------------------------------------------------------

#[test]
fn gml_file_to_score_table() {
    let doc = parse_str(
        r#"graph [
  directed 1
  node [ id 1 label "A" ]
  node [ id 2 label "B" ]
  node [ id 3 label "C" ]
  edge [ source 1 target 2 ]
  edge [ source 2 target 3 ]
  edge [ source 3 target 1 ]
]"#,
    )
    .expect("parses");
    let g = CitationGraph::from_gml(&doc).expect("builds");
    let stats = GraphStats::from_graph(&g);
    assert_eq!(stats.node_count, 3);
    assert_eq!(stats.dangling_count, 0);

    let pr = pagerank(&g, &PageRankConfig::default());
    let h = hits(&g, &HitsConfig::default());
    let table = ScoreTable::combined(&g, &pr, &h);
    assert_eq!(table.len(), 3);
    assert_eq!(table.rows[0].label, "A");
    let a = g.find("A").expect("A");
    assert_eq!(a, NodeIndex::new(0));
    assert!((table.rows[0].scores[0] - pr.scores[a]).abs() < f64::EPSILON);
}

#[test]
fn graph_is_shareable_across_threads() {
    let g = build_graph(&["A", "B", "C"], &[(0, 1), (1, 2), (2, 0)]);
    let (pr, h) = std::thread::scope(|s| {
        let pr = s.spawn(|| pagerank(&g, &PageRankConfig::default()));
        let h = s.spawn(|| hits(&g, &HitsConfig::default()));
        (
            pr.join().expect("pagerank thread"),
            h.join().expect("hits thread"),
        )
    });
    assert_eq!(pr, pagerank(&g, &PageRankConfig::default()));
    assert_eq!(h, hits(&g, &HitsConfig::default()));
}
