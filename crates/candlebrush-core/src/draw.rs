// File: crates/candlebrush-core/src/draw.rs
// Summary: Skia drawing for panels: axes, series, annotations, coordinates, brush and crosshair.

use skia_safe as skia;

use crate::annotation::Annotation;
use crate::axis::{Edge, MouseCoordinate, XAxis, YAxis};
use crate::bar::{ChartBar, MacdPoint};
use crate::chart::{CanvasLayout, Panel, PanelLayout};
use crate::format;
use crate::geometry::RectF;
use crate::grid::{index_ticks, nice_ticks};
use crate::indicator::{Accessor, MacdCalculator};
use crate::series::Series;
use crate::text::TextShaper;
use crate::theme::{BarColorFn, Theme};

const LABEL_SIZE: f32 = 11.0;
const TICK_SIZE: f32 = 6.0;

/// Everything a draw call needs, borrowed for one frame.
pub(crate) struct Ctx<'a> {
    pub canvas: &'a skia::Canvas,
    pub theme: &'a Theme,
    pub text: Option<&'a TextShaper>,
    pub bars: &'a [ChartBar],
    pub layout: &'a CanvasLayout,
    pub cursor: Option<(f32, f32)>,
}

impl Ctx<'_> {
    fn visible(&self) -> impl Iterator<Item = (usize, &ChartBar)> + '_ {
        let (first, last) = self.layout.visible.unwrap_or((1, 0));
        self.bars.iter().enumerate().skip(first).take((last + 1).saturating_sub(first))
    }

    /// Bar under the cursor when it is over the plot, else the last visible bar.
    fn current_index(&self) -> Option<usize> {
        let (_, last) = self.layout.visible?;
        let hovered = self
            .cursor
            .filter(|&(x, y)| self.layout.plot.contains(x, y))
            .and_then(|(x, _)| self.layout.index_at(x));
        Some(hovered.unwrap_or(last))
    }

    fn x(&self, index: usize) -> f32 { self.layout.x_scale.to_px(index as f64) }

    fn label(&self, s: &str, x: f32, y: f32, color: skia::Color, align: Align) {
        let Some(text) = self.text else { return };
        match align {
            Align::Left => text.draw_left(self.canvas, s, x, y, LABEL_SIZE, color, true),
            Align::Right => text.draw_right(self.canvas, s, x, y, LABEL_SIZE, color, true),
            Align::Center => text.draw_centered(self.canvas, s, x, y, LABEL_SIZE, color, true),
        }
    }

    fn label_width(&self, s: &str) -> f32 {
        self.text.map(|t| t.measure_width(s, LABEL_SIZE, true)).unwrap_or(0.0)
    }
}

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
    Center,
}

fn stroke(color: skia::Color, width: f32) -> skia::Paint {
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    p.set_style(skia::paint::Style::Stroke);
    p.set_stroke_width(width);
    p.set_color(color);
    p
}

fn fill(color: skia::Color) -> skia::Paint {
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    p.set_style(skia::paint::Style::Fill);
    p.set_color(color);
    p
}

pub(crate) fn panel(ctx: &Ctx<'_>, panel: &Panel, pl: &PanelLayout) {
    if let Some(axis) = &panel.x_axis { x_axis(ctx, axis, pl); }
    if let Some(axis) = &panel.y_axis { y_axis(ctx, axis, pl); }

    ctx.canvas.save();
    ctx.canvas.clip_rect(pl.rect.to_skia(), skia::ClipOp::Intersect, true);
    for s in &panel.series {
        match *s {
            Series::Candlestick => candles(ctx, pl),
            Series::Line { accessor, stroke } => line(ctx, pl, accessor, stroke),
            Series::Bar { accessor, fill } => bars(ctx, pl, accessor, fill),
            Series::Area { accessor, stroke, fill } => area(ctx, pl, accessor, stroke, fill),
            Series::Macd { calculator } => macd(ctx, pl, &calculator),
        }
    }
    ctx.canvas.restore();

    for a in &panel.annotations {
        annotation(ctx, a, pl);
    }
    for c in &panel.coordinates {
        mouse_coordinate(ctx, c, pl);
    }
}

// ---- axes -------------------------------------------------------------------

fn x_axis(ctx: &Ctx<'_>, axis: &XAxis, pl: &PanelLayout) {
    let y = pl.rect.bottom;
    let paint = stroke(ctx.theme.axis_line, 1.0);
    ctx.canvas.draw_line((pl.rect.left, y), (pl.rect.right, y), &paint);
    if axis.outer_tick_size > 0.0 {
        for x in [pl.rect.left, pl.rect.right] {
            ctx.canvas.draw_line((x, y), (x, y + axis.outer_tick_size), &paint);
        }
    }
    if !axis.show_ticks { return; }
    let Some((first, last)) = ctx.layout.visible else { return };

    let tick_paint = stroke(ctx.theme.tick, 1.0);
    let mut previous = None;
    for i in index_ticks(first, last, axis.ticks) {
        let x = ctx.x(i);
        ctx.canvas.draw_line((x, y), (x, y + TICK_SIZE), &tick_paint);
        let date = ctx.bars[i].date;
        ctx.label(&format::time_tick(date, previous), x, y + TICK_SIZE + LABEL_SIZE + 2.0, ctx.theme.axis_label, Align::Center);
        previous = Some(date);
    }
}

fn y_axis(ctx: &Ctx<'_>, axis: &YAxis, pl: &PanelLayout) {
    let (x, dir, align) = match axis.at {
        Edge::Left => (pl.rect.left, -1.0, Align::Right),
        _ => (pl.rect.right, 1.0, Align::Left),
    };
    let paint = stroke(ctx.theme.axis_line, 1.0);
    ctx.canvas.draw_line((x, pl.rect.top), (x, pl.rect.bottom), &paint);

    let tick_paint = stroke(ctx.theme.tick, 1.0);
    let s = &pl.y_scale;
    for v in nice_ticks(s.vmin, s.vmax, axis.ticks) {
        let y = s.to_px(v);
        ctx.canvas.draw_line((x, y), (x + dir * TICK_SIZE, y), &tick_paint);
        let lx = x + dir * (TICK_SIZE + 3.0);
        ctx.label(&axis.format.format(v), lx, y + LABEL_SIZE * 0.35, ctx.theme.axis_label, align);
    }
}

// ---- series -----------------------------------------------------------------

fn candles(ctx: &Ctx<'_>, pl: &PanelLayout) {
    let half = (ctx.layout.x_scale.bar_spacing() * 0.35).max(0.5);
    let wick = stroke(ctx.theme.candle_outline, 1.0);
    let outline = stroke(ctx.theme.candle_outline, 0.5);
    let s = &pl.y_scale;

    for (i, b) in ctx.visible() {
        let x = ctx.x(i);
        ctx.canvas.draw_line((x, s.to_px(b.high)), (x, s.to_px(b.low)), &wick);

        let top = s.to_px(b.open).min(s.to_px(b.close));
        let bot = s.to_px(b.open).max(s.to_px(b.close));
        let rect = skia::Rect::from_ltrb(x - half, top, x + half, bot.max(top + 1.0));
        let color = if b.is_up() { ctx.theme.candle_up } else { ctx.theme.candle_down };
        ctx.canvas.draw_rect(rect, &fill(color));
        ctx.canvas.draw_rect(rect, &outline);
    }
}

/// Polyline through defined values; gaps (warm-up) restart the path.
fn value_path(ctx: &Ctx<'_>, pl: &PanelLayout, accessor: impl Fn(&ChartBar) -> Option<f64>) -> skia::Path {
    let mut path = skia::Path::new();
    let mut pen_down = false;
    for (i, b) in ctx.visible() {
        match accessor(b) {
            Some(v) => {
                let p = (ctx.x(i), pl.y_scale.to_px(v));
                if pen_down { path.line_to(p); } else { path.move_to(p); }
                pen_down = true;
            }
            None => pen_down = false,
        }
    }
    path
}

fn line(ctx: &Ctx<'_>, pl: &PanelLayout, accessor: Accessor<f64>, color: skia::Color) {
    let path = value_path(ctx, pl, accessor);
    ctx.canvas.draw_path(&path, &stroke(color, 1.5));
}

fn bars(ctx: &Ctx<'_>, pl: &PanelLayout, accessor: Accessor<f64>, color: BarColorFn) {
    let half = (ctx.layout.x_scale.bar_spacing() * 0.35).max(0.5);
    let base = pl.y_scale.bottom_px;
    for (i, b) in ctx.visible() {
        let Some(v) = accessor(b) else { continue };
        let x = ctx.x(i);
        let y = pl.y_scale.to_px(v);
        let rect = skia::Rect::from_ltrb(x - half, y.min(base), x + half, y.max(base));
        ctx.canvas.draw_rect(rect, &fill(color(&b.bar, ctx.theme)));
    }
}

fn area(ctx: &Ctx<'_>, pl: &PanelLayout, accessor: Accessor<f64>, line_color: skia::Color, fill_color: skia::Color) {
    let base = pl.y_scale.bottom_px;
    let points: Vec<(f32, f32)> = ctx
        .visible()
        .filter_map(|(i, b)| accessor(b).map(|v| (ctx.x(i), pl.y_scale.to_px(v))))
        .collect();
    let (Some(first), Some(last)) = (points.first(), points.last()) else { return };

    let mut shape = skia::Path::new();
    shape.move_to((first.0, base));
    for &p in &points { shape.line_to(p); }
    shape.line_to((last.0, base));
    shape.close();
    ctx.canvas.draw_path(&shape, &fill(fill_color));

    let outline = value_path(ctx, pl, accessor);
    ctx.canvas.draw_path(&outline, &stroke(line_color, 1.0));
}

fn macd(ctx: &Ctx<'_>, pl: &PanelLayout, calc: &MacdCalculator) {
    let read = calc.accessor;
    let zero = pl.y_scale.to_px(0.0);
    let half = (ctx.layout.x_scale.bar_spacing() * 0.25).max(0.5);
    let hist = fill(calc.style.divergence_fill);
    for (i, b) in ctx.visible() {
        let Some(m) = read(b) else { continue };
        let x = ctx.x(i);
        let y = pl.y_scale.to_px(m.divergence);
        ctx.canvas.draw_rect(skia::Rect::from_ltrb(x - half, y.min(zero), x + half, y.max(zero)), &hist);
    }
    let zero_line = stroke(ctx.theme.grid, 1.0);
    ctx.canvas.draw_line((pl.rect.left, zero), (pl.rect.right, zero), &zero_line);

    let macd_line = value_path(ctx, pl, |b| read(b).map(|m| m.macd));
    ctx.canvas.draw_path(&macd_line, &stroke(calc.style.macd_stroke, 1.5));
    let signal_line = value_path(ctx, pl, |b| read(b).map(|m| m.signal));
    ctx.canvas.draw_path(&signal_line, &stroke(calc.style.signal_stroke, 1.5));
}

// ---- annotations ------------------------------------------------------------

fn annotation(ctx: &Ctx<'_>, a: &Annotation, pl: &PanelLayout) {
    let Some(current) = ctx.current_index() else { return };
    let item = &ctx.bars[current];
    match a {
        Annotation::CurrentCoordinate { accessor, fill: color } => {
            if let Some(v) = accessor(item) {
                ctx.canvas.draw_circle((ctx.x(current), pl.y_scale.to_px(v)), 3.0, &fill(*color));
            }
        }
        Annotation::EdgeIndicator { accessor, fill: color, at } => {
            let Some((_, last)) = ctx.layout.visible else { return };
            let bar = &ctx.bars[last].bar;
            let v = accessor(bar);
            let text = format::fixed(v, 2);
            value_box(ctx, pl, *at, pl.y_scale.to_px(v), &text, color(bar, ctx.theme), ctx.theme.edge_text);
        }
        Annotation::OhlcTooltip { origin } => {
            let entries = [
                ("Date: ", format::date_ymd(item.date)),
                (" O: ", format::fixed(item.open, 2)),
                (" H: ", format::fixed(item.high, 2)),
                (" L: ", format::fixed(item.low, 2)),
                (" C: ", format::fixed(item.close, 2)),
                (" Vol: ", format::si(item.volume, 4)),
            ];
            tooltip_row(ctx, pl, *origin, &entries);
        }
        Annotation::MovingAverageTooltip { origin, entries } => {
            let mut x = pl.rect.left + origin.0;
            let y = pl.rect.top + origin.1 + LABEL_SIZE;
            for e in entries {
                ctx.canvas.draw_line((x, y - 4.0), (x + 10.0, y - 4.0), &stroke(e.stroke, 2.0));
                let value = (e.accessor)(item).map(|v| format::fixed(v, 2)).unwrap_or_else(|| "n/a".into());
                ctx.label(&e.label, x + 14.0, y, ctx.theme.tooltip_label, Align::Left);
                let vx = x + 18.0 + ctx.label_width(&e.label);
                ctx.label(&value, vx, y, ctx.theme.tooltip_value, Align::Left);
                x += 120.0;
            }
        }
        Annotation::MacdTooltip { origin, calculator } => {
            let fmt = |f: fn(&MacdPoint) -> f64| {
                (calculator.accessor)(item).map(|m| format::fixed(f(&m), 2)).unwrap_or_else(|| "n/a".into())
            };
            let label = format!("MACD ({}, {}, {}): ", calculator.slow, calculator.fast, calculator.signal);
            let entries = [
                (label.as_str(), fmt(|m| m.macd)),
                (" Signal: ", fmt(|m| m.signal)),
                (" Divergence: ", fmt(|m| m.divergence)),
            ];
            tooltip_row(ctx, pl, *origin, &entries);
        }
    }
}

/// Alternating label/value text starting at `origin` (panel-relative).
fn tooltip_row(ctx: &Ctx<'_>, pl: &PanelLayout, origin: (f32, f32), entries: &[(&str, String)]) {
    let mut x = pl.rect.left + origin.0;
    let y = pl.rect.top + origin.1 + LABEL_SIZE;
    for (label, value) in entries {
        ctx.label(label, x, y, ctx.theme.tooltip_label, Align::Left);
        x += ctx.label_width(label);
        ctx.label(value, x, y, ctx.theme.tooltip_value, Align::Left);
        x += ctx.label_width(value);
    }
}

/// Filled box with a value, hanging off the left or right edge of the panel at `y`.
fn value_box(ctx: &Ctx<'_>, pl: &PanelLayout, at: Edge, y: f32, text: &str, bg: skia::Color, fg: skia::Color) {
    let w = ctx.label_width(text).max(30.0) + 8.0;
    let h = LABEL_SIZE + 6.0;
    let (left, right) = match at {
        Edge::Left => (pl.rect.left - w, pl.rect.left),
        _ => (pl.rect.right, pl.rect.right + w),
    };
    let rect = skia::Rect::from_ltrb(left, y - h * 0.5, right, y + h * 0.5);
    ctx.canvas.draw_rect(rect, &fill(bg));
    ctx.label(text, left + 4.0, y + LABEL_SIZE * 0.35, fg, Align::Left);
}

fn mouse_coordinate(ctx: &Ctx<'_>, c: &MouseCoordinate, pl: &PanelLayout) {
    let Some((cx, cy)) = ctx.cursor else { return };
    if !ctx.layout.plot.contains(cx, cy) { return; }
    match *c {
        MouseCoordinate::Y { at, format } => {
            if !pl.rect.contains(cx, cy) { return; }
            let v = pl.y_scale.from_px(cy);
            value_box(ctx, pl, at, cy, &format.format(v), ctx.theme.coordinate_fill, ctx.theme.coordinate_text);
        }
        MouseCoordinate::X { .. } => {
            let Some(i) = ctx.current_index() else { return };
            let text = format::date_ymd(ctx.bars[i].date);
            let w = ctx.label_width(&text).max(60.0) + 8.0;
            let x = ctx.x(i);
            let rect = skia::Rect::from_xywh(x - w * 0.5, pl.rect.bottom, w, LABEL_SIZE + 6.0);
            ctx.canvas.draw_rect(rect, &fill(ctx.theme.coordinate_fill));
            ctx.label(&text, x, pl.rect.bottom + LABEL_SIZE + 1.0, ctx.theme.coordinate_text, Align::Center);
        }
    }
}

// ---- canvas overlays --------------------------------------------------------

pub(crate) fn brush_rect(ctx: &Ctx<'_>, sel: RectF) {
    let r = sel.to_skia();
    ctx.canvas.draw_rect(r, &fill(ctx.theme.brush_fill));
    ctx.canvas.draw_rect(r, &stroke(ctx.theme.brush_stroke, 1.0));
}

pub(crate) fn crosshair(ctx: &Ctx<'_>, (cx, cy): (f32, f32)) {
    let plot = ctx.layout.plot;
    if !plot.contains(cx, cy) { return; }
    let mut paint = stroke(ctx.theme.crosshair, 1.0);
    paint.set_path_effect(skia::PathEffect::dash(&[4.0, 3.0], 0.0));
    let x = ctx.current_index().map(|i| ctx.x(i)).unwrap_or(cx);
    ctx.canvas.draw_line((plot.left, cy), (plot.right, cy), &paint);
    ctx.canvas.draw_line((x, plot.top), (x, plot.bottom), &paint);
}
