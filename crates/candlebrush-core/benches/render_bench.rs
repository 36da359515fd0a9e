// File: crates/candlebrush-core/benches/render_bench.rs
// Purpose: PNG and SVG render cost for the default chart view.

use anyhow::Result;
use candlebrush_core::types::RenderType;
use candlebrush_core::{sample, CandleStickChartWithBrush, CandlestickChartProps, RenderOptions};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn build_chart(chart_type: RenderType) -> Option<CandleStickChartWithBrush> {
    let mut props = CandlestickChartProps::new(sample::daily_bars(2012));
    props.chart_type = chart_type;
    CandleStickChartWithBrush::new(props).ok()
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    for (name, kind) in [("png", RenderType::Raster), ("svg", RenderType::Vector)] {
        let Some(chart) = build_chart(kind) else { continue };
        group.bench_function(name, |b| {
            let mut opts = RenderOptions::default();
            opts.draw_labels = false;
            b.iter(|| -> Result<()> {
                let out = chart.render(&opts)?;
                black_box(out);
                Ok(())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
