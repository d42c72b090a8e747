use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn gen_dice_samples(n: usize) -> Vec<[u8; 12]> {
    // Simple deterministic xorshift64, no rand dependency.
    let mut x: u64 = 0x1234_5678_9ABC_DEF0;
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let mut d = [0u8; 12];
        for v in d.iter_mut() {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            *v = (x % 6) as u8 + 1;
        }
        out.push(d);
    }
    out
}

fn bench_calculate_score(c: &mut Criterion) {
    let mut g = c.benchmark_group("naasii_core_scoring");
    for &n in &[256usize, 4096usize] {
        let samples = gen_dice_samples(n);
        g.bench_with_input(
            BenchmarkId::new("calculate_score_batch", n),
            &samples,
            |b, s| {
                b.iter(|| {
                    for dice in s.iter() {
                        let r = naasii_core::calculate_score(black_box(dice)).unwrap();
                        black_box(r);
                    }
                })
            },
        );
    }
    g.finish();
}

fn bench_analyze_dice(c: &mut Criterion) {
    let samples = gen_dice_samples(1024);
    c.bench_function("naasii_core_analyze_dice", |b| {
        b.iter(|| {
            for dice in samples.iter() {
                black_box(naasii_core::analyze_dice(black_box(dice)));
            }
        })
    });
}

criterion_group!(benches, bench_calculate_score, bench_analyze_dice);
criterion_main!(benches);
