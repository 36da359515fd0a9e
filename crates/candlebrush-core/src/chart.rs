// File: crates/candlebrush-core/src/chart.rs
// Summary: Multi-panel chart canvas, its pixel layout, and the Skia render pipeline (SVG or PNG).

use std::rc::Rc;

use skia_safe as skia;

use crate::annotation::Annotation;
use crate::axis::{MouseCoordinate, XAxis, YAxis};
use crate::bar::ChartBar;
use crate::draw;
use crate::error::{ChartError, Result};
use crate::geometry::RectF;
use crate::scale::{TimeIndex, TimeScale, ValueScale};
use crate::series::Series;
use crate::text::TextShaper;
use crate::theme::Theme;
use crate::types::{Insets, Padding, RenderType, HEIGHT, WIDTH};
use crate::view::{visible_range, XExtents, YExtents};

/// Places a panel inside the plot area, given the plot's `(width, height)`.
pub type OriginFn = fn(f32, f32) -> (f32, f32);

pub fn origin_top(_w: f32, _h: f32) -> (f32, f32) { (0.0, 0.0) }

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub theme: Theme,
    /// Axis labels, tooltips and coordinate text. Off gives font-independent output.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { theme: Theme::default(), draw_labels: true }
    }
}

/// One horizontal band of the canvas with its own y-scale.
#[derive(Clone, Debug)]
pub struct Panel {
    pub id: u32,
    pub height: f32,
    pub origin: OriginFn,
    pub padding: Padding,
    pub y_extents: YExtents,
    pub x_axis: Option<XAxis>,
    pub y_axis: Option<YAxis>,
    pub coordinates: Vec<MouseCoordinate>,
    pub series: Vec<Series>,
    pub annotations: Vec<Annotation>,
    /// Whether the brush overlay lives on this panel.
    pub hosts_brush: bool,
}

impl Panel {
    pub fn new(id: u32, height: f32, y_extents: YExtents) -> Self {
        Self {
            id,
            height,
            origin: origin_top,
            padding: Padding::default(),
            y_extents,
            x_axis: None,
            y_axis: None,
            coordinates: Vec::new(),
            series: Vec::new(),
            annotations: Vec::new(),
            hosts_brush: false,
        }
    }
}

/// All panels share one data set and one time axis.
#[derive(Clone, Debug)]
pub struct ChartCanvas {
    pub width: f32,
    pub height: f32,
    pub ratio: f32,
    pub margin: Insets,
    pub render_type: RenderType,
    pub series_name: String,
    pub bars: Rc<[ChartBar]>,
    pub x_extents: XExtents,
    /// Canvas-level gate for interactive drawing (the brush).
    pub draw_mode: bool,
    pub panels: Vec<Panel>,
    /// Cursor position in canvas pixels; drives the crosshair and tooltips.
    pub cursor: Option<(f32, f32)>,
    /// In-progress brush rectangle in canvas pixels.
    pub brush_selection: Option<RectF>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelLayout {
    pub id: u32,
    pub rect: RectF,
    pub y_scale: ValueScale,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CanvasLayout {
    pub plot: RectF,
    pub x_scale: TimeScale,
    /// Visible bar indices, inclusive; `None` when the x window holds no bars.
    pub visible: Option<(usize, usize)>,
    pub panels: Vec<PanelLayout>,
}

impl CanvasLayout {
    pub fn panel(&self, id: u32) -> Option<&PanelLayout> {
        self.panels.iter().find(|p| p.id == id)
    }

    /// Visible bar index nearest to canvas x pixel `px`.
    pub fn index_at(&self, px: f32) -> Option<usize> {
        let (first, last) = self.visible?;
        Some(self.x_scale.from_px(px).round().clamp(first as f64, last as f64) as usize)
    }
}

/// Finished render output.
#[derive(Clone, Debug)]
pub enum Rendered {
    Svg(String),
    Png { bytes: Vec<u8>, width_px: u32, height_px: u32 },
}

impl Rendered {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Svg(s) => s.as_bytes(),
            Self::Png { bytes, .. } => bytes,
        }
    }
}

impl ChartCanvas {
    pub fn new(bars: Rc<[ChartBar]>, x_extents: XExtents) -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            ratio: 1.0,
            margin: Insets::default(),
            render_type: RenderType::default(),
            series_name: String::new(),
            bars,
            x_extents,
            draw_mode: true,
            panels: Vec::new(),
            cursor: None,
            brush_selection: None,
        }
    }

    pub fn add_panel(&mut self, panel: Panel) {
        self.panels.push(panel);
    }

    /// Pixel rect of the first panel that hosts the brush overlay.
    pub fn brush_rect(&self) -> Option<RectF> {
        let host = self.panels.iter().find(|p| p.hosts_brush)?;
        self.layout().panel(host.id).map(|p| p.rect)
    }

    pub fn time_index(&self) -> TimeIndex {
        TimeIndex::new(self.bars.iter().map(|b| b.date).collect())
    }

    /// Plot area inside the margins, in canvas pixels.
    pub fn plot_rect(&self) -> RectF {
        RectF::from_ltrb(
            self.margin.left as f32,
            self.margin.top as f32,
            (self.width - self.margin.right as f32).max(self.margin.left as f32 + 1.0),
            (self.height - self.margin.bottom as f32).max(self.margin.top as f32 + 1.0),
        )
    }

    /// Resolve panel rectangles and scales for the current extents.
    pub fn layout(&self) -> CanvasLayout {
        let plot = self.plot_rect();
        let visible = visible_range(&self.time_index(), self.x_extents);
        let (first, last) = visible.unwrap_or((0, 0));
        let x_scale = TimeScale::for_bars(plot.left, plot.right, first, last);

        let panels = self
            .panels
            .iter()
            .map(|p| {
                let (ox, oy) = (p.origin)(plot.width(), plot.height());
                let rect = RectF::from_ltwh(plot.left + ox, plot.top + oy, plot.width(), p.height);
                let (vmin, vmax) = visible
                    .and_then(|(f, l)| p.y_extents.resolve(&self.bars, f, l))
                    .unwrap_or((0.0, 1.0));
                let y_scale = ValueScale::new_linear(
                    rect.top + p.padding.top as f32,
                    rect.bottom - p.padding.bottom as f32,
                    vmin,
                    vmax,
                );
                PanelLayout { id: p.id, rect, y_scale }
            })
            .collect();

        CanvasLayout { plot, x_scale, visible, panels }
    }

    /// Render according to `render_type`: an SVG document or a PNG at `ratio` density.
    pub fn render(&self, opts: &RenderOptions) -> Result<Rendered> {
        match self.render_type {
            RenderType::Vector => self.render_to_svg_string(opts).map(Rendered::Svg),
            RenderType::Raster => {
                let bytes = self.render_to_png_bytes(opts)?;
                let (width_px, height_px) = self.pixel_size();
                Ok(Rendered::Png { bytes, width_px, height_px })
            }
        }
    }

    /// Render and write to `path` (creating parent directories).
    pub fn render_to_file(&self, opts: &RenderOptions, path: impl AsRef<std::path::Path>) -> Result<Rendered> {
        let out = self.render(opts)?;
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, out.as_bytes())?;
        Ok(out)
    }

    /// Device pixel size of a raster render.
    pub fn pixel_size(&self) -> (u32, u32) {
        let r = if self.ratio.is_finite() && self.ratio > 0.0 { self.ratio } else { 1.0 };
        ((self.width * r).ceil().max(1.0) as u32, (self.height * r).ceil().max(1.0) as u32)
    }

    /// Render into an RGBA8 buffer. Returns (pixels, width, height, row_bytes).
    pub fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<(Vec<u8>, u32, u32, usize)> {
        let (w, h) = self.pixel_size();
        let mut surface = skia::surfaces::raster_n32_premul((w as i32, h as i32))
            .ok_or(ChartError::Surface("raster"))?;
        {
            let canvas = surface.canvas();
            canvas.save();
            canvas.scale((w as f32 / self.width, h as f32 / self.height));
            self.paint(canvas, opts);
            canvas.restore();
        }
        let info = skia::ImageInfo::new(
            (w as i32, h as i32),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let row_bytes = w as usize * 4;
        let mut pixels = vec![0u8; row_bytes * h as usize];
        if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
            return Err(ChartError::Encode { format: "rgba8", reason: "read_pixels failed".into() });
        }
        Ok((pixels, w, h, row_bytes))
    }

    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let (rgba, w, h, _) = self.render_to_rgba8(opts)?;
        let img = image::RgbaImage::from_raw(w, h, rgba)
            .ok_or_else(|| ChartError::Encode { format: "png", reason: "buffer size mismatch".into() })?;
        let mut out = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
            .map_err(|e| ChartError::Encode { format: "png", reason: e.to_string() })?;
        Ok(out)
    }

    pub fn render_to_svg_string(&self, opts: &RenderOptions) -> Result<String> {
        let bounds = skia::Rect::from_wh(self.width, self.height);
        let svg = skia::svg::Canvas::new(bounds, None);
        self.paint(&svg, opts);
        let data = svg.end();
        String::from_utf8(data.as_bytes().to_vec())
            .map_err(|e| ChartError::Encode { format: "svg", reason: e.to_string() })
    }

    /// Draw every panel, then canvas-wide overlays, in CSS pixel coordinates.
    fn paint(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let layout = self.layout();
        let text = opts.draw_labels.then(TextShaper::new);
        let ctx = draw::Ctx {
            canvas,
            theme: &opts.theme,
            text: text.as_ref(),
            bars: &self.bars,
            layout: &layout,
            cursor: self.cursor,
        };

        canvas.clear(opts.theme.background);
        for (panel, pl) in self.panels.iter().zip(&layout.panels) {
            draw::panel(&ctx, panel, pl);
        }
        if let Some(sel) = self.brush_selection {
            draw::brush_rect(&ctx, sel);
        }
        if let Some(cursor) = self.cursor {
            draw::crosshair(&ctx, cursor);
        }
    }
}
