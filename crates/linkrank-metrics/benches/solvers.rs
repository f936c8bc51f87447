use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use linkrank_metrics::graph::CitationGraph;
use linkrank_metrics::metrics::hits::{HitsConfig, hits};
use linkrank_metrics::metrics::pagerank::{PageRankConfig, pagerank};

const SIZES: &[usize] = &[100, 1_000, 10_000];
/// Mean citations per paper in the synthetic corpus.
const MEAN_OUT_DEGREE: usize = 8;

/// Papers only cite older papers, like a real citation corpus.
fn synthetic_corpus(n: usize, seed: u64) -> CitationGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let labels: Vec<String> = (0..n).map(|i| format!("paper-{i}")).collect();
    let mut edges = Vec::with_capacity(n * MEAN_OUT_DEGREE);
    for citing in 1..n {
        let count = rng.gen_range(0..=2 * MEAN_OUT_DEGREE);
        for _ in 0..count {
            edges.push((citing, rng.gen_range(0..citing)));
        }
    }
    CitationGraph::from_edges(&labels, &edges).expect("generated indices are in range")
}

fn bench_solvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("solvers");

    for &n in SIZES {
        let g = synthetic_corpus(n, 0x11_4B_u64 + n as u64);
        group.throughput(Throughput::Elements(g.edge_count() as u64));

        group.bench_with_input(BenchmarkId::new("pagerank", n), &g, |b, g| {
            b.iter(|| black_box(pagerank(g, &PageRankConfig::default())));
        });

        group.bench_with_input(BenchmarkId::new("hits", n), &g, |b, g| {
            b.iter(|| black_box(hits(g, &HitsConfig::default())));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_solvers);
criterion_main!(benches);
