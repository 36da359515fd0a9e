// File: crates/candlebrush-core/src/series.rs
// Summary: Series model for candlestick, line, bar, area and MACD marks.

use skia_safe as skia;

use crate::bar::ChartBar;
use crate::indicator::{Accessor, MacdCalculator};
use crate::theme::BarColorFn;

#[derive(Clone, Copy, Debug)]
pub enum Series {
    /// OHLC bodies and wicks; body color from the theme's up/down colors.
    Candlestick,
    /// Polyline through the defined values of `accessor`.
    Line { accessor: Accessor<f64>, stroke: skia::Color },
    /// Vertical bars from the panel bottom, colored per bar.
    Bar { accessor: Accessor<f64>, fill: BarColorFn },
    /// Filled area from the panel bottom up to `accessor`.
    Area { accessor: Accessor<f64>, stroke: skia::Color, fill: skia::Color },
    /// MACD line, signal line and divergence histogram around zero.
    Macd { calculator: MacdCalculator },
}

impl Series {
    pub fn line(accessor: Accessor<f64>, stroke: skia::Color) -> Self {
        Self::Line { accessor, stroke }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Candlestick => "candlestick",
            Self::Line { .. } => "line",
            Self::Bar { .. } => "bar",
            Self::Area { .. } => "area",
            Self::Macd { .. } => "macd",
        }
    }
}

/// Volume of a bar, as an accessor for `Series::Bar`.
pub fn volume_of(b: &ChartBar) -> Option<f64> { Some(b.volume) }
