// File: crates/candlebrush-core/src/bar.rs
// Summary: Price bar input records and the indicator-augmented bars the chart draws from.

use chrono::NaiveDate;

use crate::error::{ChartError, Result};

/// One OHLCV bucket. Input data is chronological and treated as read-only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    /// Construct a bar enforcing OHLC invariants:
    /// low <= min(open, close), high >= max(open, close), low <= high, volume >= 0.
    pub fn try_new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Result<Self> {
        let invalid = |reason| Err(ChartError::InvalidBar { date, reason });
        if ![open, high, low, close, volume].iter().all(|v| v.is_finite()) {
            return invalid("non-finite value");
        }
        if low > open.min(close) { return invalid("low above min(open,close)"); }
        if high < open.max(close) { return invalid("high below max(open,close)"); }
        if low > high { return invalid("low above high"); }
        if volume < 0.0 { return invalid("negative volume"); }
        Ok(Self { date, open, high, low, close, volume })
    }

    /// Bullish bar: strictly closed above its open.
    pub fn is_up(&self) -> bool { self.close > self.open }
}

/// MACD output for one bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MacdPoint {
    pub macd: f64,
    pub signal: f64,
    pub divergence: f64,
}

/// A price bar plus the derived fields written by the indicator pipeline.
/// `None` marks an indicator's warm-up region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartBar {
    pub bar: PriceBar,
    pub ema26: Option<f64>,
    pub ema12: Option<f64>,
    pub macd: Option<MacdPoint>,
    pub sma_volume50: Option<f64>,
}

impl From<PriceBar> for ChartBar {
    fn from(bar: PriceBar) -> Self {
        Self { bar, ema26: None, ema12: None, macd: None, sma_volume50: None }
    }
}

impl std::ops::Deref for ChartBar {
    type Target = PriceBar;
    fn deref(&self) -> &PriceBar { &self.bar }
}
