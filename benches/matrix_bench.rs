use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dense_matrix::Matrix;
use rand::{rngs::StdRng, SeedableRng};

fn make_random(seed: u64, rows: usize, cols: usize) -> Matrix {
    let mut rng = StdRng::seed_from_u64(seed);
    Matrix::random_with(&mut rng, rows, cols).unwrap()
}

fn bench_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiply");
    for size in [16usize, 64, 128] {
        group.throughput(Throughput::Elements((size * size * size) as u64));
        let a = make_random(42, size, size);
        let b = make_random(43, size, size);

        group.bench_with_input(BenchmarkId::new("square", size), &size, |bench, _| {
            bench.iter(|| a.multiply(black_box(&b)).unwrap())
        });
    }
    group.finish();
}

fn bench_prod_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("prod_chain");
    for size in [16usize, 64] {
        let a = make_random(1, size, size);
        let b = make_random(2, size, size);
        let v = make_random(3, size, 1);

        group.bench_with_input(BenchmarkId::new("matrix_matrix_vector", size), &size, |bench, _| {
            bench.iter(|| Matrix::prod(black_box(&[&a, &b, &v])))
        });
    }
    group.finish();
}

fn bench_transpose(c: &mut Criterion) {
    let mut group = c.benchmark_group("transpose");
    for size in [100usize, 500] {
        group.throughput(Throughput::Elements((size * size) as u64));
        let a = make_random(7, size, size);
        group.bench_with_input(BenchmarkId::new("square", size), &size, |bench, _| {
            bench.iter(|| a.transpose())
        });
    }
    group.finish();
}

fn bench_sum_axis(c: &mut Criterion) {
    let mut group = c.benchmark_group("sum_axis");
    let a = make_random(9, 500, 500);
    for axis in [0usize, 1] {
        group.bench_with_input(BenchmarkId::new("500x500", axis), &axis, |bench, &axis| {
            bench.iter(|| a.sum_axis(axis))
        });
    }
    group.finish();
}

fn bench_decompose_qr(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompose_qr");
    for size in [8usize, 32, 64] {
        let a = make_random(11, size, size);
        group.bench_with_input(BenchmarkId::new("gram_schmidt", size), &size, |bench, _| {
            bench.iter(|| a.decompose_qr())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_multiply,
    bench_prod_chain,
    bench_transpose,
    bench_sum_axis,
    bench_decompose_qr
);
criterion_main!(benches);
