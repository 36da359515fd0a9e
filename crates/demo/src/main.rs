// File: crates/demo/src/main.rs
// Summary: Demo loads daily OHLCV bars (CSV/TSV or synthetic) and renders the brush chart's
// default view, plus a zoomed view when a brush rectangle is given.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use candlebrush_core::{sample, theme};
use candlebrush_core::{
    BrushCoords, BrushType, CandleStickChartWithBrush, CandlestickChartProps, ChartError, PriceBar, RenderOptions,
    RenderType,
};
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "candlebrush-demo", about = "Render a candlestick chart with EMA, MACD and volume overlays")]
struct Cli {
    /// CSV or TSV file with date, open, high, low, close, volume columns
    input: Option<PathBuf>,

    /// Output type: vector (svg) or raster (png); unknown values fall back to vector
    #[arg(long = "type", default_value = "vector")]
    chart_type: String,

    /// Canvas width in CSS pixels
    #[arg(long, default_value_t = 1024.0)]
    width: f32,

    /// Device pixel ratio for raster output
    #[arg(long, default_value_t = 1.0)]
    ratio: f32,

    /// Directory for rendered files
    #[arg(long, default_value = "target/out")]
    out_dir: PathBuf,

    /// Brush corners as X1,Y1,X2,Y2 (dates as YYYY-MM-DD)
    #[arg(long, value_parser = parse_brush)]
    brush: Option<BrushCoords>,

    /// Zoom only the time axis when brushing
    #[arg(long)]
    one_d: bool,

    /// Theme preset: light, dark or high-contrast-dark
    #[arg(long, default_value = "light")]
    theme: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let data = match &cli.input {
        Some(path) => load_bars(path).with_context(|| format!("failed to load '{}'", path.display()))?,
        None => {
            tracing::info!("no input given, using synthetic 2012 bars");
            sample::daily_bars(2012)
        }
    };
    tracing::info!(bars = data.len(), "loaded price bars");

    let props = CandlestickChartProps {
        data,
        width: cli.width,
        ratio: cli.ratio,
        chart_type: RenderType::from_prop(Some(&cli.chart_type)),
    };
    let ext = props.chart_type.extension();
    let brush_type = if cli.one_d { BrushType::OneD } else { BrushType::TwoD };
    let mut chart = CandleStickChartWithBrush::new(props)
        .context("invalid chart props")?
        .with_brush_type(brush_type);

    let opts = RenderOptions { theme: theme::find(&cli.theme), ..RenderOptions::default() };

    let default_out = cli.out_dir.join(format!("candlebrush_default.{ext}"));
    chart.canvas().render_to_file(&opts, &default_out)
        .with_context(|| format!("rendering {}", default_out.display()))?;
    println!("Wrote {}", default_out.display());

    if let Some(coords) = cli.brush {
        chart.handle_brush(&coords.into());
        let state = chart.state();
        tracing::info!(from = %state.x_extents.0, to = %state.x_extents.1, "zoomed view");
        let zoomed_out = cli.out_dir.join(format!("candlebrush_brushed.{ext}"));
        chart.canvas().render_to_file(&opts, &zoomed_out)
            .with_context(|| format!("rendering {}", zoomed_out.display()))?;
        println!("Wrote {}", zoomed_out.display());
    }
    Ok(())
}

fn parse_brush(s: &str) -> std::result::Result<BrushCoords, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x1, y1, x2, y2] = parts.as_slice() else {
        return Err(format!("expected X1,Y1,X2,Y2, got '{s}'"));
    };
    let date = |v: &str| NaiveDate::parse_from_str(v, "%Y-%m-%d").map_err(|e| format!("bad date '{v}': {e}"));
    let num = |v: &str| v.parse::<f64>().map_err(|e| format!("bad value '{v}': {e}"));
    Ok(BrushCoords { x1: date(*x1)?, y1: num(*y1)?, x2: date(*x2)?, y2: num(*y2)? })
}

fn load_bars(path: &Path) -> Result<Vec<PriceBar>> {
    let tsv = path.extension().is_some_and(|e| e.eq_ignore_ascii_case("tsv"));
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(if tsv { b'\t' } else { b',' })
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect::<Vec<_>>();
    tracing::debug!(?headers, "input headers");

    let idx = |name: &str| -> Result<usize> {
        headers.iter().position(|h| h == name).with_context(|| format!("missing '{name}' column"))
    };
    let (i_date, i_open, i_high, i_low, i_close, i_volume) =
        (idx("date")?, idx("open")?, idx("high")?, idx("low")?, idx("close")?, idx("volume")?);

    let mut out = Vec::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let num = |i: usize| rec.get(i).and_then(|s| s.trim().parse::<f64>().ok());
        let date = rec.get(i_date).and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok());
        let (Some(date), Some(o), Some(h), Some(l), Some(c), Some(v)) =
            (date, num(i_open), num(i_high), num(i_low), num(i_close), num(i_volume))
        else {
            tracing::warn!(row, "skipping row with unparsable fields");
            continue;
        };
        match PriceBar::try_new(date, o, h, l, c, v) {
            Ok(bar) => out.push(bar),
            Err(e) => tracing::warn!(row, %e, "skipping invalid bar"),
        }
    }

    if out.is_empty() {
        return Err(ChartError::EmptyData.into());
    }
    out.sort_by_key(|b| b.date);
    Ok(out)
}
