// File: crates/chart-dioxus/src/lib.rs
// Summary: Dioxus desktop component hosting the candlestick brush chart.
// Notes:
// - UI deps sit behind the `desktop` feature, so the workspace builds without fetching Dioxus.
// - The component renders to an inline SVG (vector) or a PNG data URL (raster) and forwards
//   mouse and key-up events to the chart; the chart's key listener lives on a per-component hub.

use candlebrush_core::{CandlestickChartProps, PriceBar, RenderType};

/// Build core props from host values. Missing or unknown `chart_type` falls back to vector.
pub fn chart_props(data: Vec<PriceBar>, width: f32, ratio: f32, chart_type: Option<&str>) -> CandlestickChartProps {
    CandlestickChartProps { data, width, ratio, chart_type: RenderType::from_prop(chart_type) }
}

#[cfg(feature = "desktop")]
pub mod ui {
    use super::*;
    use base64::Engine as _;
    use candlebrush_core::{
        CandleStickChartWithBrush, KeyCode, KeyEvent, KeyEventKind, KeyboardHub, RenderOptions, Rendered, Theme,
    };
    use dioxus::prelude::*;

    #[derive(Props, Clone, PartialEq)]
    pub struct CandleStickChartProps {
        pub data: Vec<PriceBar>,
        #[props(default = 1024.0)]
        pub width: f32,
        #[props(default = 1.0)]
        pub ratio: f32,
        /// "svg"/"vector" or "hybrid"/"canvas"/"raster"
        #[props(default)]
        pub chart_type: Option<String>,
        #[props(default = Theme::light())]
        pub theme: Theme,
    }

    fn to_markup(rendered: Rendered) -> String {
        match rendered {
            Rendered::Svg(svg) => svg,
            Rendered::Png { bytes, width_px, height_px } => {
                let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
                format!(
                    "<img width=\"{width_px}\" height=\"{height_px}\" style=\"width:100%;height:100%\" \
                     src=\"data:image/png;base64,{b64}\"/>"
                )
            }
        }
    }

    /// Candlestick chart with brush-to-zoom. Props changes re-derive the bars but keep the
    /// zoom state and the key listener.
    #[component]
    pub fn CandleStickChart(props: CandleStickChartProps) -> Element {
        let hub = use_hook(KeyboardHub::new);
        let make_props = {
            let p = props.clone();
            move || chart_props(p.data.clone(), p.width, p.ratio, p.chart_type.as_deref())
        };

        let mut chart = use_signal(|| CandleStickChartWithBrush::new(make_props()).ok());
        use_hook(|| {
            if let Some(c) = chart.write().as_mut() { c.mount(&hub); }
        });

        let next = make_props();
        let stale = chart.peek().as_ref().is_some_and(|c| {
            let cur = c.props();
            cur.width != next.width || cur.ratio != next.ratio || cur.chart_type != next.chart_type || cur.data != next.data
        });
        if stale {
            if let Some(c) = chart.write().as_mut() {
                if let Err(e) = c.update_props(next) { tracing::warn!(%e, "ignoring props update"); }
            }
        }

        let opts = RenderOptions { theme: props.theme, ..RenderOptions::default() };
        let markup = match chart.read().as_ref().map(|c| c.render(&opts)) {
            Some(Ok(r)) => to_markup(r),
            Some(Err(e)) => format!("<pre>render failed: {e}</pre>"),
            None => "<pre>invalid chart props</pre>".to_string(),
        };

        let at = |e: &MouseEvent| {
            let p = e.element_coordinates();
            (p.x as f32, p.y as f32)
        };

        rsx! {
            div {
                tabindex: 0,
                style: format!("position:relative; width:{}px; height:600px; outline:none;", props.width),
                onmousedown: move |e| {
                    let (x, y) = at(&e);
                    if let Some(c) = chart.write().as_mut() { c.pointer_down(x, y); }
                },
                onmousemove: move |e| {
                    let (x, y) = at(&e);
                    if let Some(c) = chart.write().as_mut() { c.pointer_move(x, y); }
                },
                onmouseup: move |e| {
                    let (x, y) = at(&e);
                    if let Some(c) = chart.write().as_mut() { c.pointer_up(x, y); }
                },
                onmouseleave: move |_| {
                    if let Some(c) = chart.write().as_mut() { c.set_cursor(None); }
                },
                onkeyup: {
                    let hub = hub.clone();
                    move |e: KeyboardEvent| {
                        let code = match e.key() {
                            Key::Escape => Some(KeyCode::ESCAPE),
                            _ => KeyCode::from_dom_code(&e.code().to_string()),
                        };
                        if let Some(code) = code {
                            hub.dispatch(&KeyEvent { kind: KeyEventKind::Up, code });
                        }
                        // Gesture state lives behind the chart's brush; repaint.
                        chart.write();
                    }
                },
                div { style: "position:absolute; inset:0;", dangerous_inner_html: markup }
            }
        }
    }

    /// Tiny demo launcher so consumers can quickly mount the component.
    pub fn run_demo_ui() -> Result<(), String> {
        #[component]
        fn App() -> Element {
            let data = candlebrush_core::sample::daily_bars(2012);
            rsx! { CandleStickChart { data, width: 1024.0, ratio: 1.0, chart_type: Some("svg".to_string()) } }
        }

        let cfg = dioxus_desktop::Config::new()
            .with_window(dioxus_desktop::WindowBuilder::new().with_title("Candlebrush"));
        let providers: Vec<Box<dyn Fn() -> Box<dyn std::any::Any> + Send + Sync>> = Vec::new();
        let globals: Vec<Box<dyn std::any::Any>> = vec![Box::new(cfg)];
        dioxus_desktop::launch::launch(App, providers, globals);
        Ok(())
    }
}

/// Fallback when the `desktop` feature is not enabled.
#[cfg(not(feature = "desktop"))]
pub fn run_demo_ui() -> Result<(), &'static str> {
    Err("candlebrush-dioxus built without `desktop` feature; enable features to run UI demo")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_chart_type_falls_back_to_vector() {
        let p = chart_props(Vec::new(), 800.0, 2.0, Some("webgl"));
        assert_eq!(p.chart_type, RenderType::Vector);
        assert_eq!(chart_props(Vec::new(), 800.0, 2.0, Some("hybrid")).chart_type, RenderType::Raster);
        assert_eq!(chart_props(Vec::new(), 800.0, 2.0, None).chart_type, RenderType::Vector);
    }
}
