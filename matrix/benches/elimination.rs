use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tc_field::GaloisField;
use tc_matrix::dense::RowMajorMatrix;
use tc_matrix::echelon::{null_space, row_echelon};

fn elimination_benchmark(c: &mut Criterion) {
    const DIMS: [(usize, usize); 3] = [(16, 32), (32, 64), (64, 128)];

    let mut rng = SmallRng::seed_from_u64(42);
    for order in [2, 256] {
        let field = GaloisField::new(order).unwrap();
        let mut g = c.benchmark_group(format!("GF({order})"));
        for (h, w) in DIMS {
            let m = RowMajorMatrix::rand(&field, &mut rng, h, w);
            let name = format!("{h}x{w}");
            g.bench_with_input(BenchmarkId::new("row_echelon", &name), &m, |b, m| {
                b.iter(|| row_echelon(&field, m))
            });
            g.bench_with_input(BenchmarkId::new("null_space", &name), &m, |b, m| {
                b.iter(|| null_space(&field, m))
            });
        }
        g.finish();
    }
}

criterion_group!(benches, elimination_benchmark);
criterion_main!(benches);
