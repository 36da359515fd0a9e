// File: crates/candlebrush-core/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow.
// Behavior:
// - Renders the default brush chart to PNG bytes without labels.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if snapshot exists, compares decoded pixels for exact match.
// - Else, logs a note and returns (skips) without failing to ease first run.

mod common;

use candlebrush_core::types::RenderType;
use candlebrush_core::{CandleStickChartWithBrush, CandlestickChartProps, RenderOptions};

fn render_bytes() -> Vec<u8> {
    let mut props = CandlestickChartProps::new(common::bars_2012());
    props.chart_type = RenderType::Raster;
    props.width = 800.0;
    let chart = CandleStickChartWithBrush::new(props).expect("valid props");

    let mut opts = RenderOptions::default();
    opts.draw_labels = false; // avoid text nondeterminism across platforms
    chart.canvas().render_to_png_bytes(&opts).expect("render png")
}

#[test]
fn golden_default_view() {
    let bytes = render_bytes();
    let snap_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join("default_view.png");

    let update = std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if update {
        std::fs::create_dir_all(&snap_dir).expect("create snapshots dir");
        std::fs::write(&snap_path, &bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), bytes.len());
        return;
    }

    if snap_path.exists() {
        let want = std::fs::read(&snap_path).expect("read snapshot");
        // Compare decoded pixel buffers to avoid PNG encoder variance
        let got_img = image::load_from_memory(&bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "rendered pixels differ from golden snapshot: {}", snap_path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
    }
}
