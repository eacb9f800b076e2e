use criterion::{criterion_group, criterion_main, Criterion};
use xgsim::mc::MonteCarloEngine;
use xgsim::rate::MatchRates;

fn criterion_benchmark(c: &mut Criterion) {
    let rates = MatchRates::new(1.70, 1.46).unwrap();

    {
        // sanity check
        let result = MonteCarloEngine::default()
            .with_iterations(1_000)
            .with_seed(42)
            .simulate(&rates)
            .unwrap();
        assert_eq!(1_000, result.iterations);
    }

    c.bench_function("cri_mc_engine_10k", |b| {
        let engine = MonteCarloEngine::default()
            .with_iterations(10_000)
            .with_seed(42);
        b.iter(|| engine.simulate(&rates).unwrap());
    });
    c.bench_function("cri_mc_engine_100k_4_workers", |b| {
        let engine = MonteCarloEngine::default()
            .with_iterations(100_000)
            .with_seed(42)
            .with_workers(4);
        b.iter(|| engine.simulate(&rates).unwrap());
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
