use criterion::{criterion_group, criterion_main, Criterion};
use tinyrand::{Seeded, StdRand};
use xgsim::poisson::{self, Sampler};

fn criterion_benchmark(c: &mut Criterion) {
    let mut rand = StdRand::seed(42);
    for lambda in [0.35, 1.7, 25.0] {
        let sampler = Sampler::new(lambda);
        c.bench_function(&format!("cri_poisson_sample_{lambda}"), |b| {
            b.iter(|| sampler.sample(&mut rand));
        });
    }
    c.bench_function("cri_poisson_univariate", |b| {
        b.iter(|| poisson::univariate(3, 1.7));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
