//! Criterion benchmarks for the reference agent.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use tilth_agents::{Agent, ReachabilityAgent};
use tilth_bench::reference_profile;
use tilth_engine::Environment;

fn bench_reachability_episode(c: &mut Criterion) {
    let config = reference_profile(42);
    c.bench_function("reachability_500_turns_4k", |b| {
        b.iter(|| {
            let mut env = Environment::new(config.clone()).unwrap();
            let mut agent = ReachabilityAgent::new();
            for _ in 0..500 {
                let action = agent.decide(&env.observe());
                env.step(action).unwrap();
            }
            black_box(env.metrics().coverage)
        });
    });
}

fn bench_reachability_decide_late(c: &mut Criterion) {
    // Decision cost grows with the known map; measure it after a long run.
    let mut env = Environment::new(reference_profile(42)).unwrap();
    let mut agent = ReachabilityAgent::new();
    for _ in 0..2000 {
        let action = agent.decide(&env.observe());
        env.step(action).unwrap();
    }
    let obs = env.observe();
    c.bench_function("reachability_decide_after_2000", |b| {
        b.iter(|| black_box(agent.decide(black_box(&obs))));
    });
}

criterion_group!(
    benches,
    bench_reachability_episode,
    bench_reachability_decide_late
);
criterion_main!(benches);
