use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hampath::graph::{PathFinder, SearchConfig, SearchStrategy};
use hampath::Graph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_graph(n: u32, p: f64, seed: u64) -> Graph<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|u| {
            let neighbors: Vec<u32> = (0..n).filter(|&v| v != u && rng.gen_bool(p)).collect();
            (u, neighbors)
        })
        .collect()
}

/// Chain declared backwards: undirected reads have to walk reverse entries the whole way.
fn reversed_chain(n: u32) -> Graph<u32> {
    (0..n)
        .map(|v| (v, if v == 0 { vec![] } else { vec![v - 1] }))
        .collect()
}

fn bench_random_graphs(c: &mut Criterion) {
    let mut group = c.benchmark_group("Hamiltonian Random");
    for &n in &[6u32, 8, 10] {
        let graph = random_graph(n, 0.3, 42);
        let finder = PathFinder::new(&graph);
        for (name, config) in [
            ("undirected", SearchConfig::undirected()),
            ("directed", SearchConfig::directed()),
        ] {
            group.bench_with_input(BenchmarkId::new(name, n), &config, |b, config| {
                b.iter(|| black_box(finder.find(black_box(config))))
            });
        }
    }
    group.finish();
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("Hamiltonian Strategy");
    let graph = reversed_chain(500);
    let finder = PathFinder::new(&graph);
    for strategy in [SearchStrategy::Recursive, SearchStrategy::Iterative] {
        let config = SearchConfig::undirected().with_strategy(strategy);
        group.bench_function(format!("{strategy:?}"), |b| {
            b.iter(|| black_box(finder.find(&config)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_random_graphs, bench_strategies);
criterion_main!(benches);
