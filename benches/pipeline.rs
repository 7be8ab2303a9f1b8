use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dfamin::random::random_nfa;

fn pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    for states in [4usize, 8, 12] {
        let mut rng = fastrand::Rng::with_seed(states as u64);
        let nfa = random_nfa(&mut rng, states, 2, 3, 0.2, 0.3);
        let dfa = nfa.determinize(true);

        group.bench_with_input(BenchmarkId::new("determinize", states), &nfa, |b, nfa| {
            b.iter(|| black_box(nfa.determinize(true)))
        });
        group.bench_with_input(BenchmarkId::new("minimize", states), &dfa, |b, dfa| {
            b.iter(|| black_box(dfa.minimize(&mut ()).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, pipeline);
criterion_main!(benches);
