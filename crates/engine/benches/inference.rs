//! Throughput of single and batched inference.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gamefuzz_engine::{build_rule_base, infer, score_batch, Inputs};

fn single_inference(c: &mut Criterion) {
    let rules = build_rule_base().expect("built-in rule table");
    c.bench_function("infer_single", |b| {
        b.iter(|| infer(&rules, black_box(72.0), black_box(48.0), black_box(81.0)))
    });
}

fn batch_inference(c: &mut Criterion) {
    let rules = build_rule_base().expect("built-in rule table");
    let inputs: Vec<Inputs> = (0..10_000)
        .map(|i| {
            let x = (i % 101) as f64;
            Inputs::new(x, (x * 13.0) % 101.0, 100.0 - x)
        })
        .collect();
    c.bench_function("score_batch_10k", |b| {
        b.iter(|| score_batch(&rules, black_box(&inputs)))
    });
}

criterion_group!(benches, single_inference, batch_inference);
criterion_main!(benches);
