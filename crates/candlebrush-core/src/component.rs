// File: crates/candlebrush-core/src/component.rs
// Summary: Candlestick chart with EMA/MACD/volume overlays and brush-to-zoom.
// Notes:
// - Owns the derived bars, the zoom controller and the brush overlay.
// - While mounted, holds exactly one key-up listener on the host's KeyboardHub.

use std::cell::RefCell;
use std::rc::Rc;

use crate::annotation::{Annotation, MaTooltipEntry};
use crate::axis::{Edge, MouseCoordinate, XAxis, YAxis};
use crate::bar::{ChartBar, PriceBar};
use crate::brush::{Brush, BrushCoords, BrushEvent, BrushType};
use crate::chart::{CanvasLayout, ChartCanvas, Panel, RenderOptions, Rendered};
use crate::controller::{BrushZoomController, ViewPhase, ZoomState};
use crate::error::{ChartError, Result};
use crate::format::NumberFormat;
use crate::indicator::{Indicator, Indicators};
use crate::keyboard::{KeyCode, KeyEventKind, KeyboardHub, ListenerHandle};
use crate::series::{volume_of, Series};
use crate::theme::{close_vs_open, BarColorFn};
use crate::types::{Padding, RenderType, WIDTH};
use crate::view::{YAccessor, YExtents};

/// Brush mode the chart is created with.
pub const BRUSH_TYPE: BrushType = BrushType::TwoD;
pub const SERIES_NAME: &str = "MSFT";
/// Panel that hosts the brush overlay and whose scales invert brush corners.
pub const BRUSH_PANEL: u32 = 1;

#[derive(Clone, Debug)]
pub struct CandlestickChartProps {
    pub data: Vec<PriceBar>,
    /// Canvas width in CSS pixels.
    pub width: f32,
    /// Device pixel ratio for raster output.
    pub ratio: f32,
    pub chart_type: RenderType,
}

impl CandlestickChartProps {
    pub fn new(data: Vec<PriceBar>) -> Self {
        Self { data, width: WIDTH, ratio: 1.0, chart_type: RenderType::default() }
    }

    fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(ChartError::InvalidProps(format!("width must be positive, got {}", self.width)));
        }
        if !(self.ratio.is_finite() && self.ratio > 0.0) {
            return Err(ChartError::InvalidProps(format!("ratio must be positive, got {}", self.ratio)));
        }
        if self.data.is_empty() {
            return Err(ChartError::InvalidProps("data must not be empty".into()));
        }
        Ok(())
    }
}

pub struct CandleStickChartWithBrush {
    props: CandlestickChartProps,
    indicators: Indicators,
    bars: Rc<[ChartBar]>,
    controller: BrushZoomController,
    brush: Rc<RefCell<Brush>>,
    listener: Option<ListenerHandle>,
    cursor: Option<(f32, f32)>,
    bar_color: BarColorFn,
}

impl CandleStickChartWithBrush {
    pub fn new(props: CandlestickChartProps) -> Result<Self> {
        props.validate()?;
        let indicators = Indicators::default();
        let bars: Rc<[ChartBar]> = indicators.apply(&props.data).into();
        let controller = BrushZoomController::new(ZoomState::initial(&indicators), BRUSH_TYPE);
        Ok(Self {
            props,
            indicators,
            bars,
            controller,
            brush: Rc::new(RefCell::new(Brush::new(BRUSH_TYPE))),
            listener: None,
            cursor: None,
            bar_color: close_vs_open,
        })
    }

    /// Switch the brush mode. Resets the view to its defaults.
    pub fn with_brush_type(mut self, brush_type: BrushType) -> Self {
        self.controller = BrushZoomController::new(ZoomState::initial(&self.indicators), brush_type);
        *self.brush.borrow_mut() = Brush::new(brush_type);
        self
    }

    /// Color policy for volume bars.
    pub fn with_bar_color(mut self, bar_color: BarColorFn) -> Self {
        self.bar_color = bar_color;
        self
    }

    pub fn props(&self) -> &CandlestickChartProps { &self.props }
    pub fn bars(&self) -> &[ChartBar] { &self.bars }
    pub fn indicators(&self) -> &Indicators { &self.indicators }
    pub fn state(&self) -> &ZoomState { self.controller.state() }
    pub fn phase(&self) -> ViewPhase { self.controller.phase() }
    pub fn brush_type(&self) -> BrushType { self.controller.brush_type() }
    pub fn is_mounted(&self) -> bool { self.listener.is_some() }
    pub fn is_brushing(&self) -> bool { self.brush.borrow().is_active() }

    /// Attach the Escape handler to `hub`. Mounting twice keeps the first listener.
    pub fn mount(&mut self, hub: &Rc<KeyboardHub>) {
        if self.listener.is_some() { return; }
        let brush = Rc::clone(&self.brush);
        let handle = hub.add_listener(KeyEventKind::Up, move |event| {
            tracing::debug!(key_code = event.code.0, "key up");
            if event.code == KeyCode::ESCAPE && brush.borrow_mut().terminate() {
                tracing::debug!("brush gesture terminated");
            }
        });
        self.listener = Some(handle);
        tracing::info!(series = SERIES_NAME, "chart mounted");
    }

    pub fn unmount(&mut self) {
        if self.listener.take().is_some() {
            tracing::info!(series = SERIES_NAME, "chart unmounted");
        }
    }

    /// Replace the props. Derived bars are recomputed; the view state and the key
    /// listener are kept.
    pub fn update_props(&mut self, props: CandlestickChartProps) -> Result<()> {
        props.validate()?;
        self.bars = self.indicators.apply(&props.data).into();
        self.props = props;
        Ok(())
    }

    pub fn handle_brush(&mut self, event: &BrushEvent) {
        self.controller.handle_brush(event);
        self.brush.borrow_mut().enabled = self.controller.state().brush_enabled;
    }

    pub fn set_cursor(&mut self, cursor: Option<(f32, f32)>) {
        self.cursor = cursor;
    }

    /// Start a brush gesture at canvas pixel `(x, y)`. Only starts inside the panel that
    /// hosts the brush while the canvas is in draw mode.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        let canvas = self.canvas();
        let inside = canvas.brush_rect().is_some_and(|r| r.contains(x, y));
        inside && self.brush.borrow_mut().begin(canvas.draw_mode, x, y)
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.cursor = Some((x, y));
        self.brush.borrow_mut().drag(x, y);
    }

    /// Finish the gesture; a non-empty selection is committed and returned.
    pub fn pointer_up(&mut self, x: f32, y: f32) -> Option<BrushEvent> {
        let corners = self.brush.borrow_mut().end(x, y)?;
        let event = self.brush_event(corners, &self.layout())?;
        self.handle_brush(&event);
        Some(event)
    }

    /// Invert pixel corners through the price panel: x to the nearest bar date, y to price.
    fn brush_event(&self, corners: [(f32, f32); 2], layout: &CanvasLayout) -> Option<BrushEvent> {
        let pl = layout.panel(BRUSH_PANEL)?;
        let [(ax, ay), (bx, by)] = corners;
        let (i1, i2) = (layout.index_at(ax)?, layout.index_at(bx)?);
        let coords = BrushCoords {
            x1: self.bars[i1].date,
            y1: pl.y_scale.from_px(ay),
            x2: self.bars[i2].date,
            y2: pl.y_scale.from_px(by),
        };
        Some(BrushEvent { coords, items: Some([self.bars[i1].bar, self.bars[i2].bar]), mouse: Some(corners) })
    }

    /// Compose the three panels for the current props and view state.
    pub fn canvas(&self) -> ChartCanvas {
        let ind = &self.indicators;
        let state = self.controller.state();

        let mut canvas = ChartCanvas::new(Rc::clone(&self.bars), state.x_extents);
        canvas.width = self.props.width;
        canvas.ratio = self.props.ratio;
        canvas.render_type = self.props.chart_type;
        canvas.series_name = SERIES_NAME.to_string();
        canvas.draw_mode = state.brush_enabled;
        canvas.cursor = self.cursor;

        let mut price = Panel::new(1, 400.0, state.y_extents.clone());
        price.padding = Padding::new(10, 20);
        price.x_axis = Some(XAxis::bottom_bare());
        price.y_axis = Some(YAxis::new(Edge::Right, 5));
        price.coordinates = vec![MouseCoordinate::Y { at: Edge::Right, format: NumberFormat::Fixed(2) }];
        price.series = vec![
            Series::Candlestick,
            Series::line(ind.ema26.accessor, ind.ema26.stroke),
            Series::line(ind.ema12.accessor, ind.ema12.stroke),
        ];
        price.annotations = vec![
            Annotation::CurrentCoordinate { accessor: ind.ema26.accessor, fill: ind.ema26.stroke },
            Annotation::CurrentCoordinate { accessor: ind.ema12.accessor, fill: ind.ema12.stroke },
            Annotation::EdgeIndicator { accessor: |b| b.close, fill: close_vs_open, at: Edge::Right },
            Annotation::OhlcTooltip { origin: (-40.0, 0.0) },
            Annotation::MovingAverageTooltip {
                origin: (-38.0, 15.0),
                entries: [ind.ema26, ind.ema12]
                    .iter()
                    .map(|e| MaTooltipEntry { label: e.label(), stroke: e.stroke, accessor: e.accessor })
                    .collect(),
            },
        ];
        price.hosts_brush = true;

        let mut volume = Panel::new(
            2,
            150.0,
            YExtents::Accessors(vec![
                YAccessor::Volume,
                YAccessor::value("sma_volume50", ind.sma_volume50.accessor),
            ]),
        );
        volume.origin = |_w, h| (0.0, h - 300.0);
        volume.y_axis = Some(YAxis::new(Edge::Left, 5).with_format(NumberFormat::Si(0)));
        volume.coordinates = vec![MouseCoordinate::Y { at: Edge::Left, format: NumberFormat::Si(4) }];
        volume.series = vec![
            Series::Bar { accessor: volume_of, fill: self.bar_color },
            Series::Area {
                accessor: ind.sma_volume50.accessor,
                stroke: ind.sma_volume50.stroke,
                fill: ind.sma_volume50.fill,
            },
        ];

        let mut macd = Panel::new(3, 150.0, YExtents::Accessors(vec![YAccessor::Macd { read: ind.macd.accessor }]));
        macd.origin = |_w, h| (0.0, h - 150.0);
        macd.padding = Padding::new(10, 10);
        macd.x_axis = Some(XAxis::bottom());
        macd.y_axis = Some(YAxis::new(Edge::Right, 2));
        macd.coordinates = vec![
            MouseCoordinate::X { at: Edge::Bottom },
            MouseCoordinate::Y { at: Edge::Right, format: NumberFormat::Fixed(2) },
        ];
        macd.series = vec![Series::Macd { calculator: ind.macd }];
        macd.annotations = vec![Annotation::MacdTooltip { origin: (-38.0, 15.0), calculator: ind.macd }];

        canvas.add_panel(price);
        canvas.add_panel(volume);
        canvas.add_panel(macd);

        canvas.brush_selection = canvas.brush_rect().and_then(|rect| self.brush.borrow().selection(rect));
        canvas
    }

    pub fn layout(&self) -> CanvasLayout { self.canvas().layout() }

    pub fn render(&self, opts: &RenderOptions) -> Result<Rendered> {
        self.canvas().render(opts)
    }

    /// RGBA8 pixels for windowed hosts. Returns (pixels, width, height, row_bytes).
    pub fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<(Vec<u8>, u32, u32, usize)> {
        self.canvas().render_to_rgba8(opts)
    }
}

impl Drop for CandleStickChartWithBrush {
    fn drop(&mut self) {
        self.unmount();
    }
}
