// File: crates/candlebrush-core/src/controller.rs
// Summary: Brush/zoom controller: the committed view extents and the one-way brush flag.

use chrono::NaiveDate;

use crate::brush::{BrushEvent, BrushType};
use crate::indicator::Indicators;
use crate::view::{XExtents, YAccessor, YExtents};

/// Window shown before any brush has been committed.
pub fn default_x_extents() -> XExtents {
    let d = |m, day| NaiveDate::from_ymd_opt(2012, m, day).unwrap_or_default();
    (d(1, 3), d(6, 29))
}

/// Series bounding the price panel while unzoomed: `[high, low]` and both EMAs.
pub fn default_y_extents(indicators: &Indicators) -> YExtents {
    YExtents::Accessors(vec![
        YAccessor::HighLow,
        YAccessor::value("ema26", indicators.ema26.accessor),
        YAccessor::value("ema12", indicators.ema12.accessor),
    ])
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewPhase {
    IdleDefaultView,
    Zoomed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ZoomState {
    pub x_extents: XExtents,
    pub y_extents: YExtents,
    pub brush_enabled: bool,
}

impl ZoomState {
    pub fn initial(indicators: &Indicators) -> Self {
        Self {
            x_extents: default_x_extents(),
            y_extents: default_y_extents(indicators),
            brush_enabled: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct BrushZoomController {
    state: ZoomState,
    brush_type: BrushType,
    phase: ViewPhase,
}

impl BrushZoomController {
    pub fn new(initial: ZoomState, brush_type: BrushType) -> Self {
        Self { state: initial, brush_type, phase: ViewPhase::IdleDefaultView }
    }

    pub fn state(&self) -> &ZoomState { &self.state }
    pub fn phase(&self) -> ViewPhase { self.phase }
    pub fn brush_type(&self) -> BrushType { self.brush_type }

    /// Apply a committed brush: normalise the corners into the new x window (and y range
    /// for a 2D brush), then disable further brushing.
    pub fn handle_brush(&mut self, event: &BrushEvent) {
        let c = event.coords;
        let left = c.x1.min(c.x2);
        let right = c.x1.max(c.x2);
        let y_extents = match self.brush_type {
            BrushType::TwoD => YExtents::Range { low: c.y1.min(c.y2), high: c.y1.max(c.y2) },
            BrushType::OneD => self.state.y_extents.clone(),
        };
        tracing::debug!(
            x1 = %c.x1, y1 = c.y1, x2 = %c.x2, y2 = c.y2,
            brush_type = %self.brush_type,
            "brush committed"
        );
        self.state = ZoomState { x_extents: (left, right), y_extents, brush_enabled: false };
        self.phase = ViewPhase::Zoomed;
    }
}
