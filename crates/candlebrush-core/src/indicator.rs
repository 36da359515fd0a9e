// File: crates/candlebrush-core/src/indicator.rs
// Summary: Indicator calculators (EMA, SMA, MACD) and the pipeline that derives augmented bars.
// Notes:
// - Calculators are plain config structs: parameters, a source field, a merge function
//   that attaches the computed value to a `ChartBar`, and an accessor that reads it back.
// - The pipeline never touches its input; it returns fresh `ChartBar`s.

use skia_safe as skia;

use crate::bar::{ChartBar, MacdPoint, PriceBar};

/// Reads the value an indicator is computed over.
pub type Source = fn(&PriceBar) -> f64;
/// Attaches a computed value to a bar.
pub type Merge<T> = fn(&mut ChartBar, T);
/// Reads a computed value back from a bar.
pub type Accessor<T> = fn(&ChartBar) -> Option<T>;

pub fn close(b: &PriceBar) -> f64 { b.close }
pub fn volume(b: &PriceBar) -> f64 { b.volume }

/// Simple moving average; the first `window - 1` entries are `None`.
pub fn sma_values(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window { return out; }
    let mut sum = 0.0f64;
    for i in 0..values.len() {
        sum += values[i];
        if i + 1 >= window {
            if i + 1 > window { sum -= values[i - window]; }
            out[i] = Some(sum / window as f64);
        }
    }
    out
}

/// Exponential moving average seeded with the SMA of the first `window` values.
/// k = 2/(n+1); ema[i] = v[i]*k + ema[i-1]*(1-k).
pub fn ema_values(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window { return out; }
    let k = 2.0 / (window as f64 + 1.0);
    let mut ema = values[..window].iter().sum::<f64>() / window as f64;
    out[window - 1] = Some(ema);
    for i in window..values.len() {
        ema = values[i] * k + ema * (1.0 - k);
        out[i] = Some(ema);
    }
    out
}

/// MACD line = EMA(fast) - EMA(slow); signal = EMA(signal) of the defined MACD line;
/// divergence = MACD - signal. A point is emitted once the signal line is defined.
pub fn macd_values(values: &[f64], fast: usize, slow: usize, signal: usize) -> Vec<Option<MacdPoint>> {
    let mut out = vec![None; values.len()];
    if fast == 0 || slow == 0 || signal == 0 { return out; }

    let ema_fast = ema_values(values, fast);
    let ema_slow = ema_values(values, slow);
    let line: Vec<Option<f64>> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| Some((*f)? - (*s)?))
        .collect();

    let Some(first) = line.iter().position(Option::is_some) else { return out };
    let defined: Vec<f64> = line[first..].iter().map(|v| v.unwrap_or_default()).collect();
    let signal_line = ema_values(&defined, signal);

    for (offset, sig) in signal_line.into_iter().enumerate() {
        if let Some(sig) = sig {
            let macd = defined[offset];
            out[first + offset] = Some(MacdPoint { macd, signal: sig, divergence: macd - sig });
        }
    }
    out
}

/// Indicator transforms the source bars into a derived value merged into each output bar.
pub trait Indicator {
    fn id(&self) -> Option<u32>;
    /// Tooltip/legend label, e.g. `EMA (26)`.
    fn label(&self) -> String;
    /// Compute over `source` and merge into `out` (same length, same order).
    fn apply(&self, source: &[PriceBar], out: &mut [ChartBar]);
}

#[derive(Clone, Copy, Debug)]
pub struct EmaCalculator {
    pub id: u32,
    pub window_size: usize,
    pub source: Source,
    pub merge: Merge<f64>,
    pub accessor: Accessor<f64>,
    pub stroke: skia::Color,
}

impl EmaCalculator {
    pub fn calculate(&self, bars: &[PriceBar]) -> Vec<Option<f64>> {
        let src: Vec<f64> = bars.iter().map(self.source).collect();
        ema_values(&src, self.window_size)
    }
}

impl Indicator for EmaCalculator {
    fn id(&self) -> Option<u32> { Some(self.id) }
    fn label(&self) -> String { format!("EMA ({})", self.window_size) }
    fn apply(&self, source: &[PriceBar], out: &mut [ChartBar]) {
        let values = self.calculate(source);
        merge_all(out, values, self.merge);
        tracing::trace!(id = self.id, window = self.window_size, "ema applied");
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SmaCalculator {
    pub id: u32,
    pub window_size: usize,
    pub source: Source,
    pub merge: Merge<f64>,
    pub accessor: Accessor<f64>,
    pub stroke: skia::Color,
    pub fill: skia::Color,
}

impl SmaCalculator {
    pub fn calculate(&self, bars: &[PriceBar]) -> Vec<Option<f64>> {
        let src: Vec<f64> = bars.iter().map(self.source).collect();
        sma_values(&src, self.window_size)
    }
}

impl Indicator for SmaCalculator {
    fn id(&self) -> Option<u32> { Some(self.id) }
    fn label(&self) -> String { format!("SMA ({})", self.window_size) }
    fn apply(&self, source: &[PriceBar], out: &mut [ChartBar]) {
        let values = self.calculate(source);
        merge_all(out, values, self.merge);
        tracing::trace!(id = self.id, window = self.window_size, "sma applied");
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MacdStyle {
    pub macd_stroke: skia::Color,
    pub signal_stroke: skia::Color,
    pub divergence_fill: skia::Color,
}

#[derive(Clone, Copy, Debug)]
pub struct MacdCalculator {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
    pub source: Source,
    pub merge: Merge<MacdPoint>,
    pub accessor: Accessor<MacdPoint>,
    pub style: MacdStyle,
}

impl MacdCalculator {
    pub fn calculate(&self, bars: &[PriceBar]) -> Vec<Option<MacdPoint>> {
        let src: Vec<f64> = bars.iter().map(self.source).collect();
        macd_values(&src, self.fast, self.slow, self.signal)
    }
}

impl Indicator for MacdCalculator {
    fn id(&self) -> Option<u32> { None }
    fn label(&self) -> String { format!("MACD ({}, {}, {})", self.slow, self.fast, self.signal) }
    fn apply(&self, source: &[PriceBar], out: &mut [ChartBar]) {
        let values = self.calculate(source);
        merge_all(out, values, self.merge);
        tracing::trace!(fast = self.fast, slow = self.slow, signal = self.signal, "macd applied");
    }
}

fn merge_all<T>(out: &mut [ChartBar], values: Vec<Option<T>>, merge: Merge<T>) {
    for (bar, value) in out.iter_mut().zip(values) {
        if let Some(v) = value { merge(bar, v); }
    }
}

/// The four calculators the brush chart registers, with their fixed parameters.
#[derive(Clone, Copy, Debug)]
pub struct Indicators {
    pub ema26: EmaCalculator,
    pub ema12: EmaCalculator,
    pub macd: MacdCalculator,
    pub sma_volume50: SmaCalculator,
}

impl Default for Indicators {
    fn default() -> Self {
        Self {
            ema26: EmaCalculator {
                id: 0,
                window_size: 26,
                source: close,
                merge: |b, v| b.ema26 = Some(v),
                accessor: |b| b.ema26,
                stroke: skia::Color::from_rgb(0xFF, 0x7F, 0x0E),
            },
            ema12: EmaCalculator {
                id: 1,
                window_size: 12,
                source: close,
                merge: |b, v| b.ema12 = Some(v),
                accessor: |b| b.ema12,
                stroke: skia::Color::from_rgb(0x1F, 0x77, 0xB4),
            },
            macd: MacdCalculator {
                fast: 12,
                slow: 26,
                signal: 9,
                source: close,
                merge: |b, v| b.macd = Some(v),
                accessor: |b| b.macd,
                style: MacdStyle {
                    macd_stroke: skia::Color::from_rgb(0xFF, 0x00, 0x00),
                    signal_stroke: skia::Color::from_rgb(0x00, 0xF3, 0x00),
                    divergence_fill: skia::Color::from_rgb(0x46, 0x82, 0xB4),
                },
            },
            sma_volume50: SmaCalculator {
                id: 3,
                window_size: 10,
                source: volume,
                merge: |b, v| b.sma_volume50 = Some(v),
                accessor: |b| b.sma_volume50,
                stroke: skia::Color::from_rgb(0x46, 0x82, 0xB4),
                fill: skia::Color::from_argb(0x66, 0x46, 0x82, 0xB4),
            },
        }
    }
}

impl Indicators {
    /// Calculators in the order they are registered on the canvas.
    pub fn pipeline(&self) -> [&dyn Indicator; 4] {
        [&self.ema26, &self.ema12, &self.sma_volume50, &self.macd]
    }

    /// Derive augmented bars from `data`. The input slice is never modified, and
    /// running twice over the same input yields identical output.
    pub fn apply(&self, data: &[PriceBar]) -> Vec<ChartBar> {
        let mut out: Vec<ChartBar> = data.iter().copied().map(ChartBar::from).collect();
        for calc in self.pipeline() {
            calc.apply(data, &mut out);
        }
        tracing::debug!(bars = out.len(), "indicator pipeline applied");
        out
    }
}
