use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BenchmarkId;
use criterion::Criterion;

use rand::{Rng, SeedableRng};

use minkball::{BallTreeBuilder, Minkowski, Points};

fn random_rows(n: usize, d: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| (0..d).map(|_| rng.gen_range(-1000.0..1000.0)).collect()).collect()
}

fn construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");
    group
        .significance_level(0.05)
        .measurement_time(std::time::Duration::new(10, 0))
        .sample_size(30);

    let dims = [8, 32];
    let sizes = [1_000, 10_000, 100_000];

    for &d in &dims {
        for &n in &sizes {
            let rows = random_rows(n, d, 0);
            let bench_name = format!("euclidean-{n}-{d}");
            group.bench_with_input(BenchmarkId::new("build", &bench_name), &rows, |b, rows| {
                b.iter_with_large_drop(|| {
                    let points = Points::from_rows(rows).unwrap();
                    BallTreeBuilder::new(points)
                        .leaf_size(20)
                        .metric(Minkowski::euclidean())
                        .build()
                        .unwrap()
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, construction);
criterion_main!(benches);
