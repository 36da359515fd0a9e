// File: crates/candlebrush-core/src/lib.rs
// Summary: Core library entry point; exports the chart component, indicator pipeline and render API.

pub mod annotation;
pub mod axis;
pub mod bar;
pub mod brush;
pub mod chart;
pub mod component;
pub mod controller;
mod draw;
pub mod error;
pub mod format;
pub mod geometry;
pub mod grid;
pub mod indicator;
pub mod keyboard;
pub mod sample;
pub mod scale;
pub mod series;
pub mod text;
pub mod theme;
pub mod types;
pub mod view;

pub use bar::{ChartBar, MacdPoint, PriceBar};
pub use brush::{Brush, BrushCoords, BrushEvent, BrushType};
pub use chart::{CanvasLayout, ChartCanvas, Panel, PanelLayout, RenderOptions, Rendered};
pub use component::{CandleStickChartWithBrush, CandlestickChartProps};
pub use controller::{BrushZoomController, ViewPhase, ZoomState};
pub use error::{ChartError, Result};
pub use indicator::{EmaCalculator, Indicator, Indicators, MacdCalculator, SmaCalculator};
pub use keyboard::{KeyCode, KeyEvent, KeyEventKind, KeyboardHub, ListenerHandle};
pub use theme::Theme;
pub use text::TextShaper;
pub use types::RenderType;
