// File: crates/candlebrush-core/src/theme.rs
// Summary: Light/Dark theming for chart rendering colors, plus the bar color policy.

use skia_safe as skia;

use crate::bar::PriceBar;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub tick: skia::Color,
    pub crosshair: skia::Color,
    pub candle_up: skia::Color,
    pub candle_down: skia::Color,
    pub candle_outline: skia::Color,
    pub tooltip_label: skia::Color,
    pub tooltip_value: skia::Color,
    pub coordinate_fill: skia::Color,
    pub coordinate_text: skia::Color,
    pub edge_text: skia::Color,
    pub brush_fill: skia::Color,
    pub brush_stroke: skia::Color,
}

impl Theme {
    /// White background with the classic green/red bar colors.
    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 255, 255, 255),
            grid: skia::Color::from_argb(255, 232, 232, 236),
            axis_line: skia::Color::from_argb(255, 0, 0, 0),
            axis_label: skia::Color::from_argb(255, 0, 0, 0),
            tick: skia::Color::from_argb(255, 0, 0, 0),
            crosshair: skia::Color::from_argb(255, 0, 0, 0),
            candle_up: skia::Color::from_argb(255, 0x6B, 0xA5, 0x83),
            candle_down: skia::Color::from_argb(255, 0xFF, 0x00, 0x00),
            candle_outline: skia::Color::from_argb(255, 0, 0, 0),
            tooltip_label: skia::Color::from_argb(255, 0x4F, 0x9F, 0xFF),
            tooltip_value: skia::Color::from_argb(255, 0, 0, 0),
            coordinate_fill: skia::Color::from_argb(255, 0x52, 0x52, 0x52),
            coordinate_text: skia::Color::from_argb(255, 255, 255, 255),
            edge_text: skia::Color::from_argb(255, 255, 255, 255),
            brush_fill: skia::Color::from_argb(77, 0, 0, 0),
            brush_stroke: skia::Color::from_argb(255, 0, 0, 0),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            crosshair: skia::Color::from_argb(255, 255, 230, 70),
            candle_up: skia::Color::from_argb(255, 40, 200, 120),
            candle_down: skia::Color::from_argb(255, 220, 80, 80),
            candle_outline: skia::Color::from_argb(255, 200, 200, 210),
            tooltip_label: skia::Color::from_argb(255, 96, 156, 255),
            tooltip_value: skia::Color::from_argb(255, 235, 235, 245),
            coordinate_fill: skia::Color::from_argb(255, 70, 70, 80),
            coordinate_text: skia::Color::from_argb(255, 235, 235, 245),
            edge_text: skia::Color::from_argb(255, 18, 18, 20),
            brush_fill: skia::Color::from_argb(64, 255, 255, 255),
            brush_stroke: skia::Color::from_argb(255, 220, 220, 230),
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: skia::Color::from_argb(255, 0x00, 0x00, 0x00),
            grid: skia::Color::from_argb(255, 0x22, 0x22, 0x22),
            axis_line: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            axis_label: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            tick: skia::Color::from_argb(255, 0xcc, 0xcc, 0xcc),
            crosshair: skia::Color::from_argb(255, 0xff, 0xff, 0x00),
            candle_up: skia::Color::from_argb(255, 0x00, 0xff, 0x00),
            candle_down: skia::Color::from_argb(255, 0xff, 0x00, 0x00),
            candle_outline: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            tooltip_label: skia::Color::from_argb(255, 0x00, 0xff, 0xff),
            tooltip_value: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            coordinate_fill: skia::Color::from_argb(255, 0x44, 0x44, 0x44),
            coordinate_text: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            edge_text: skia::Color::from_argb(255, 0x00, 0x00, 0x00),
            brush_fill: skia::Color::from_argb(96, 0xff, 0xff, 0xff),
            brush_stroke: skia::Color::from_argb(255, 0xff, 0xff, 0x00),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark(), Theme::high_contrast_dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}

/// Colors a bar-shaped mark (volume bar, edge indicator) from its bar.
pub type BarColorFn = fn(&PriceBar, &Theme) -> skia::Color;

/// Up color when the bar closed above its open, down color otherwise.
pub fn close_vs_open(bar: &PriceBar, theme: &Theme) -> skia::Color {
    if bar.is_up() { theme.candle_up } else { theme.candle_down }
}
