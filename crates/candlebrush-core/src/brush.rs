// File: crates/candlebrush-core/src/brush.rs
// Summary: Brush overlay: a pixel-space drag gesture that commits a rectangle in data coordinates.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::bar::PriceBar;
use crate::geometry::RectF;

/// `TwoD` zooms both axes; `OneD` only selects a time window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BrushType {
    OneD,
    #[default]
    TwoD,
}

impl FromStr for BrushType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1D" => Ok(Self::OneD),
            "2D" => Ok(Self::TwoD),
            other => Err(format!("unknown brush type '{other}' (expected 1D or 2D)")),
        }
    }
}

impl fmt::Display for BrushType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self { Self::OneD => "1D", Self::TwoD => "2D" })
    }
}

/// Two opposite corners of a brushed rectangle, in chart-data coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrushCoords {
    pub x1: NaiveDate,
    pub y1: f64,
    pub x2: NaiveDate,
    pub y2: f64,
}

/// Payload delivered when a brush gesture completes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrushEvent {
    pub coords: BrushCoords,
    /// Bars under the start and end of the gesture.
    pub items: Option<[PriceBar; 2]>,
    /// Gesture start and end in canvas pixels.
    pub mouse: Option<[(f32, f32); 2]>,
}

impl From<BrushCoords> for BrushEvent {
    fn from(coords: BrushCoords) -> Self {
        Self { coords, items: None, mouse: None }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Gesture {
    start: (f32, f32),
    current: (f32, f32),
}

/// Interactive overlay state. Only tracks pixels; the owner maps them to data.
#[derive(Clone, Debug)]
pub struct Brush {
    pub enabled: bool,
    pub brush_type: BrushType,
    gesture: Option<Gesture>,
}

impl Brush {
    pub fn new(brush_type: BrushType) -> Self {
        Self { enabled: true, brush_type, gesture: None }
    }

    /// Start a gesture. Ignored unless the overlay is enabled and the canvas is in draw mode.
    pub fn begin(&mut self, draw_mode: bool, x: f32, y: f32) -> bool {
        if !(self.enabled && draw_mode) { return false; }
        self.gesture = Some(Gesture { start: (x, y), current: (x, y) });
        true
    }

    pub fn drag(&mut self, x: f32, y: f32) {
        if let Some(g) = self.gesture.as_mut() { g.current = (x, y); }
    }

    /// Finish the gesture, returning its pixel corners when it covers a non-empty area.
    /// A `OneD` brush only needs horizontal extent.
    pub fn end(&mut self, x: f32, y: f32) -> Option<[(f32, f32); 2]> {
        let mut g = self.gesture.take()?;
        g.current = (x, y);
        let wide = (g.start.0 - g.current.0).abs() > 0.0;
        let tall = (g.start.1 - g.current.1).abs() > 0.0;
        let ok = match self.brush_type {
            BrushType::OneD => wide,
            BrushType::TwoD => wide && tall,
        };
        ok.then_some([g.start, g.current])
    }

    /// Cancel the in-progress gesture, if any. Returns whether one was dropped.
    pub fn terminate(&mut self) -> bool {
        self.gesture.take().is_some()
    }

    pub fn is_active(&self) -> bool { self.gesture.is_some() }

    /// Rectangle to draw for the in-progress gesture, clipped to `panel`.
    /// A `OneD` selection spans the panel height.
    pub fn selection(&self, panel: RectF) -> Option<RectF> {
        let g = self.gesture?;
        let a = panel.clamp_point(g.start.0, g.start.1);
        let b = panel.clamp_point(g.current.0, g.current.1);
        let r = RectF::from_corners(a, b);
        Some(match self.brush_type {
            BrushType::TwoD => r,
            BrushType::OneD => RectF::from_ltrb(r.left, panel.top, r.right, panel.bottom),
        })
    }
}
