// File: crates/candlebrush-core/src/annotation.rs
// Summary: Non-series marks drawn on a panel: current-value dots, edge indicator, tooltips.

use skia_safe as skia;

use crate::axis::Edge;
use crate::indicator::{Accessor, MacdCalculator};
use crate::theme::BarColorFn;

/// One row of a moving-average tooltip.
#[derive(Clone, Debug)]
pub struct MaTooltipEntry {
    pub label: String,
    pub stroke: skia::Color,
    pub accessor: Accessor<f64>,
}

#[derive(Clone, Debug)]
pub enum Annotation {
    /// Dot at the value of `accessor` for the current item.
    CurrentCoordinate { accessor: Accessor<f64>, fill: skia::Color },
    /// Value box on a panel edge for the last visible bar.
    EdgeIndicator { accessor: fn(&crate::bar::PriceBar) -> f64, fill: BarColorFn, at: Edge },
    /// Date plus OHLC of the current item. `origin` is relative to the panel's top-left.
    OhlcTooltip { origin: (f32, f32) },
    MovingAverageTooltip { origin: (f32, f32), entries: Vec<MaTooltipEntry> },
    MacdTooltip { origin: (f32, f32), calculator: MacdCalculator },
}
