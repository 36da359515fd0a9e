// File: crates/candlebrush-core/tests/smoke.rs
// Purpose: End-to-end render smoke tests for vector and raster output.

mod common;

use candlebrush_core::theme::Theme;
use candlebrush_core::types::RenderType;
use candlebrush_core::{BrushCoords, CandleStickChartWithBrush, CandlestickChartProps, RenderOptions, Rendered};
use common::{bars_2012, date};

fn chart(chart_type: RenderType, width: f32, ratio: f32) -> CandleStickChartWithBrush {
    let mut props = CandlestickChartProps::new(bars_2012());
    props.chart_type = chart_type;
    props.width = width;
    props.ratio = ratio;
    CandleStickChartWithBrush::new(props).expect("valid props")
}

fn quiet() -> RenderOptions {
    let mut opts = RenderOptions::default();
    opts.draw_labels = false; // avoid font variance
    opts
}

#[test]
fn raster_png_has_device_pixel_size() {
    let c = chart(RenderType::Raster, 800.0, 2.0);
    let out = c.render(&quiet()).expect("raster render");
    let Rendered::Png { bytes, width_px, height_px } = out else { panic!("raster gives png") };
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    assert_eq!((width_px, height_px), (1600, 1200));

    let img = image::load_from_memory(&bytes).expect("decode png").to_rgba8();
    assert_eq!(img.dimensions(), (1600, 1200));
}

#[test]
fn vector_output_is_svg_document() {
    let c = chart(RenderType::Vector, 1024.0, 1.0);
    let out = c.render(&quiet()).expect("vector render");
    let Rendered::Svg(svg) = out else { panic!("vector gives svg") };
    assert!(svg.contains("<svg"), "svg root element");
    assert!(svg.contains("</svg>"));
}

#[test]
fn rgba_buffer_shape_and_background() {
    let c = chart(RenderType::Raster, 640.0, 1.0);
    let opts = quiet();
    let (px, w, h, stride) = c.render_to_rgba8(&opts).expect("rgba render");
    assert_eq!((w, h), (640, 600));
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, (w as usize) * 4);

    // Top-left corner is margin: opaque theme background.
    let bg = opts.theme.background;
    assert_eq!(&px[..4], &[bg.r(), bg.g(), bg.b(), 255]);
}

#[test]
fn renders_with_labels_cursor_and_every_theme() {
    let mut c = chart(RenderType::Raster, 900.0, 1.0);
    c.set_cursor(Some((400.0, 200.0)));
    for theme in candlebrush_core::theme::presets() {
        let opts = RenderOptions { theme, draw_labels: true };
        assert!(!c.render(&opts).expect("render").as_bytes().is_empty());
    }
    assert_eq!(Theme::default().name, "light");
}

#[test]
fn zoomed_and_empty_windows_render() {
    let mut c = chart(RenderType::Raster, 700.0, 1.0);
    c.handle_brush(&BrushCoords { x1: date(2012, 2, 1), y1: 26.0, x2: date(2012, 2, 20), y2: 34.0 }.into());
    assert!(c.render(&quiet()).is_ok());

    c.handle_brush(&BrushCoords { x1: date(2015, 1, 1), y1: 0.0, x2: date(2015, 2, 1), y2: 1.0 }.into());
    assert!(c.render(&quiet()).is_ok());
}

#[test]
fn render_to_file_writes_output() {
    let c = chart(RenderType::Raster, 500.0, 1.0);
    let out = std::path::PathBuf::from("target/test_out/smoke_chart.png");
    c.canvas().render_to_file(&quiet(), &out).expect("render to file");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");
}
