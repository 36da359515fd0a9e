// File: crates/candlebrush-core/src/axis.rs
// Summary: Axis and mouse-coordinate configuration for a panel.

use crate::format::NumberFormat;

/// Which edge of the panel an axis or coordinate label sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Bottom,
}

/// Horizontal (time) axis along the bottom of a panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct XAxis {
    pub at: Edge,
    pub show_ticks: bool,
    pub outer_tick_size: f32,
    pub ticks: usize,
}

impl XAxis {
    pub fn bottom() -> Self {
        Self { at: Edge::Bottom, show_ticks: true, outer_tick_size: 6.0, ticks: 8 }
    }
    /// Axis line only, no tick marks or labels.
    pub fn bottom_bare() -> Self {
        Self { show_ticks: false, outer_tick_size: 0.0, ..Self::bottom() }
    }
}

/// Vertical (value) axis on the left or right side of a panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YAxis {
    pub at: Edge,
    pub ticks: usize,
    pub format: NumberFormat,
}

impl YAxis {
    pub fn new(at: Edge, ticks: usize) -> Self {
        Self { at, ticks, format: NumberFormat::Fixed(2) }
    }
    pub fn with_format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }
}

/// Label that tracks the crosshair: a value box on a side edge, or a date box on the bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MouseCoordinate {
    X { at: Edge },
    Y { at: Edge, format: NumberFormat },
}
