// File: crates/window-demo/src/main.rs
// Summary: Windowed demo that renders the brush chart via RGBA blit (CPU) using winit + softbuffer.
// Left-drag on the price panel brushes; releasing Escape cancels a drag in progress.

use std::num::NonZeroU32;

use anyhow::{anyhow, Context, Result};
use candlebrush_core::{
    sample, CandleStickChartWithBrush, CandlestickChartProps, KeyCode, KeyEvent, KeyEventKind, KeyboardHub,
    RenderOptions, RenderType,
};
use tracing_subscriber::EnvFilter;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, Event, KeyboardInput, MouseButton, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Candlebrush: Window Demo")
        .with_inner_size(LogicalSize::new(1024.0, 600.0))
        .build(&event_loop)
        .context("build window")?;

    let context = unsafe { softbuffer::Context::new(&window) }.map_err(|e| anyhow!("softbuffer context: {e}"))?;
    let mut surface =
        unsafe { softbuffer::Surface::new(&context, &window) }.map_err(|e| anyhow!("softbuffer surface: {e}"))?;

    let mut chart = CandleStickChartWithBrush::new(props_for(&window, CandlestickChartProps::new(sample::daily_bars(2012))))
        .context("invalid chart props")?;
    let hub = KeyboardHub::new();
    chart.mount(&hub);

    let opts = RenderOptions::default();
    let mut cursor: Option<(f32, f32)> = None;

    event_loop.run(move |event, _, cf| {
        *cf = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    chart.unmount();
                    *cf = ControlFlow::Exit;
                }
                WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                    if let Err(e) = chart.update_props(props_for(&window, chart.props().clone())) {
                        tracing::warn!(%e, "ignoring resize");
                    }
                    window.request_redraw();
                }
                WindowEvent::CursorMoved { position, .. } => {
                    let p = position.to_logical::<f32>(window.scale_factor());
                    cursor = Some((p.x, p.y));
                    chart.pointer_move(p.x, p.y);
                    window.request_redraw();
                }
                WindowEvent::CursorLeft { .. } => {
                    cursor = None;
                    chart.set_cursor(None);
                    window.request_redraw();
                }
                WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                    let Some((x, y)) = cursor else { return };
                    match state {
                        ElementState::Pressed => { chart.pointer_down(x, y); }
                        ElementState::Released => {
                            if let Some(e) = chart.pointer_up(x, y) {
                                tracing::info!(from = %e.coords.x1, to = %e.coords.x2, "brushed");
                            }
                        }
                    }
                    window.request_redraw();
                }
                WindowEvent::KeyboardInput { input: KeyboardInput { state, virtual_keycode, .. }, .. } => {
                    let Some(code) = virtual_keycode.and_then(key_code) else { return };
                    let kind = match state {
                        ElementState::Pressed => KeyEventKind::Down,
                        ElementState::Released => KeyEventKind::Up,
                    };
                    hub.dispatch(&KeyEvent { kind, code });
                    window.request_redraw();
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                if let Err(e) = draw(&chart, &opts, &mut surface, window.inner_size()) {
                    tracing::error!(%e, "draw failed");
                }
            }
            _ => {}
        }
    });
}

/// Legacy key code for a winit virtual key, looked up by its DOM `code` name.
fn key_code(key: VirtualKeyCode) -> Option<KeyCode> {
    let name = match key {
        VirtualKeyCode::Return => "Enter".to_string(),
        VirtualKeyCode::Back => "Backspace".to_string(),
        VirtualKeyCode::Left => "ArrowLeft".to_string(),
        VirtualKeyCode::Up => "ArrowUp".to_string(),
        VirtualKeyCode::Right => "ArrowRight".to_string(),
        VirtualKeyCode::Down => "ArrowDown".to_string(),
        VirtualKeyCode::LShift | VirtualKeyCode::RShift => "ShiftLeft".to_string(),
        VirtualKeyCode::LControl | VirtualKeyCode::RControl => "ControlLeft".to_string(),
        VirtualKeyCode::LAlt | VirtualKeyCode::RAlt => "AltLeft".to_string(),
        VirtualKeyCode::Capital => "CapsLock".to_string(),
        VirtualKeyCode::NumpadEnter => "NumpadEnter".to_string(),
        other => {
            // Letters debug-print as `A`, digits as `Key1`; the rest share DOM names.
            let name = format!("{other:?}");
            match name.strip_prefix("Key") {
                Some(digit) => format!("Digit{digit}"),
                None if name.len() == 1 => format!("Key{name}"),
                None => name,
            }
        }
    };
    KeyCode::from_dom_code(&name)
}

/// Canvas width and pixel ratio follow the window.
fn props_for(window: &Window, mut props: CandlestickChartProps) -> CandlestickChartProps {
    let scale = window.scale_factor() as f32;
    let size = window.inner_size();
    props.width = (size.width.max(1) as f32 / scale).max(1.0);
    props.ratio = scale;
    props.chart_type = RenderType::Raster;
    props
}

fn draw(
    chart: &CandleStickChartWithBrush,
    opts: &RenderOptions,
    surface: &mut softbuffer::Surface,
    size: PhysicalSize<u32>,
) -> Result<()> {
    let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else { return Ok(()) };
    surface.resize(w, h).map_err(|e| anyhow!("resize surface: {e}"))?;

    let (rgba, cw, ch, stride) = chart.render_to_rgba8(opts)?;
    let mut frame = surface.buffer_mut().map_err(|e| anyhow!("frame: {e}"))?;
    frame.fill(0);
    let (w, h) = (w.get() as usize, h.get() as usize);
    for y in 0..h.min(ch as usize) {
        let row = &rgba[y * stride..y * stride + cw as usize * 4];
        for (x, px) in row.chunks_exact(4).take(w).enumerate() {
            let (r, g, b) = (px[0] as u32, px[1] as u32, px[2] as u32);
            frame[y * w + x] = (r << 16) | (g << 8) | b;
        }
    }
    frame.present().map_err(|e| anyhow!("present: {e}"))?;
    Ok(())
}
