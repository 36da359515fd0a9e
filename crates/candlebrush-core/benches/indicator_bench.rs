// File: crates/candlebrush-core/benches/indicator_bench.rs
// Purpose: Throughput of EMA, MACD and the full indicator pipeline.

use candlebrush_core::indicator::{ema_values, macd_values};
use candlebrush_core::{Indicators, PriceBar};
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn gen_bars(n: usize) -> Vec<PriceBar> {
    let start = NaiveDate::from_ymd_opt(2000, 1, 3).unwrap_or_default();
    let mut out = Vec::with_capacity(n);
    let mut prev = 100.0f64;
    for i in 0..n {
        let t = i as f64;
        let close = 100.0 + (t * 0.01).sin() * 10.0 + t * 0.001;
        let hi = prev.max(close) + 0.5;
        let lo = prev.min(close) - 0.5;
        let vol = 1.0e6 + (t * 0.3).cos().abs() * 5.0e5;
        if let Ok(b) = PriceBar::try_new(start + Duration::days(i as i64), prev, hi, lo, close, vol) {
            out.push(b);
        }
        prev = close;
    }
    out
}

fn bench_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicators");
    for &n in &[10_000usize, 100_000usize] {
        let bars = gen_bars(n);
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        group.bench_function(format!("ema26_{n}"), |b| {
            b.iter(|| black_box(ema_values(black_box(&closes), 26)))
        });
        group.bench_function(format!("macd_{n}"), |b| {
            b.iter(|| black_box(macd_values(black_box(&closes), 12, 26, 9)))
        });
        let ind = Indicators::default();
        group.bench_function(format!("pipeline_{n}"), |b| {
            b.iter(|| black_box(ind.apply(black_box(&bars))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_indicators);
criterion_main!(benches);
