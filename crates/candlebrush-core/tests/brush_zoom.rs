// File: crates/candlebrush-core/tests/brush_zoom.rs
// Purpose: Brush commit semantics of the zoom controller and the chart's pointer gestures.

mod common;

use candlebrush_core::controller::{default_x_extents, default_y_extents};
use candlebrush_core::view::{YAccessor, YExtents};
use candlebrush_core::{
    BrushCoords, BrushEvent, BrushType, BrushZoomController, CandleStickChartWithBrush, CandlestickChartProps,
    Indicators, ViewPhase, ZoomState,
};
use common::{bars_2012, date};

fn chart() -> CandleStickChartWithBrush {
    CandleStickChartWithBrush::new(CandlestickChartProps::new(bars_2012())).expect("valid props")
}

fn commit(x1: (i32, u32, u32), y1: f64, x2: (i32, u32, u32), y2: f64) -> BrushEvent {
    BrushCoords { x1: date(x1.0, x1.1, x1.2), y1, x2: date(x2.0, x2.1, x2.2), y2 }.into()
}

#[test]
fn initial_state_is_default_view() {
    let c = chart();
    let s = c.state();
    assert_eq!(s.x_extents, (date(2012, 1, 3), date(2012, 6, 29)));
    assert_eq!(s.x_extents, default_x_extents());
    assert!(s.brush_enabled);
    assert_eq!(c.phase(), ViewPhase::IdleDefaultView);
    match &s.y_extents {
        YExtents::Accessors(acc) => {
            let names: Vec<_> = acc.iter().map(YAccessor::name).collect();
            assert_eq!(names, ["high/low", "ema26", "ema12"]);
        }
        other => panic!("expected accessors, got {other:?}"),
    }
}

#[test]
fn two_d_commit_normalises_corners() {
    let mut c = chart();
    c.handle_brush(&commit((2012, 1, 10), 30.0, (2012, 1, 1), 25.0));
    let s = c.state();
    assert_eq!(s.x_extents, (date(2012, 1, 1), date(2012, 1, 10)));
    assert_eq!(s.y_extents, YExtents::Range { low: 25.0, high: 30.0 });
    assert!(!s.brush_enabled);
    assert_eq!(c.phase(), ViewPhase::Zoomed);
}

#[test]
fn corner_order_does_not_matter() {
    let ind = Indicators::default();
    let events = [
        commit((2012, 3, 1), 31.5, (2012, 2, 1), 28.0),
        commit((2012, 2, 1), 28.0, (2012, 3, 1), 31.5),
        commit((2012, 2, 1), 31.5, (2012, 3, 1), 28.0),
        commit((2012, 3, 1), 28.0, (2012, 2, 1), 31.5),
    ];
    let states: Vec<ZoomState> = events
        .iter()
        .map(|e| {
            let mut ctl = BrushZoomController::new(ZoomState::initial(&ind), BrushType::TwoD);
            ctl.handle_brush(e);
            ctl.state().clone()
        })
        .collect();
    assert!(states.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(states[0].x_extents, (date(2012, 2, 1), date(2012, 3, 1)));
}

#[test]
fn one_d_commit_keeps_y_extents() {
    let ind = Indicators::default();
    let mut ctl = BrushZoomController::new(ZoomState::initial(&ind), BrushType::OneD);
    ctl.handle_brush(&commit((2012, 5, 1), 40.0, (2012, 4, 2), 10.0));
    let s = ctl.state();
    assert_eq!(s.x_extents, (date(2012, 4, 2), date(2012, 5, 1)));
    assert_eq!(s.y_extents, default_y_extents(&ind));
    assert!(!s.brush_enabled);
}

#[test]
fn commit_while_zoomed_still_applies() {
    let mut c = chart();
    c.handle_brush(&commit((2012, 1, 10), 30.0, (2012, 1, 1), 25.0));
    c.handle_brush(&commit((2012, 1, 5), 29.0, (2012, 1, 4), 27.0));
    assert_eq!(c.state().x_extents, (date(2012, 1, 4), date(2012, 1, 5)));
    assert_eq!(c.phase(), ViewPhase::Zoomed);
    assert!(!c.state().brush_enabled);
}

#[test]
fn pointer_drag_commits_through_price_scales() {
    let mut c = chart();
    let price = c.layout().panel(1).expect("price panel").rect;
    let (x0, y0) = (price.left + 100.0, price.top + 60.0);
    let (x1, y1) = (price.left + 300.0, price.top + 250.0);

    assert!(c.pointer_down(x0, y0));
    c.pointer_move(x1, y1);
    assert!(c.is_brushing());
    let event = c.pointer_up(x1, y1).expect("non-empty brush commits");

    let s = c.state();
    assert!(!s.brush_enabled);
    assert!(s.x_extents.0 < s.x_extents.1);
    let YExtents::Range { low, high } = s.y_extents else { panic!("2D brush sets a range") };
    assert!(low < high);
    assert_eq!(event.mouse, Some([(x0, y0), (x1, y1)]));
    let items = event.items.expect("items under the corners");
    assert_eq!(items[0].date, event.coords.x1);

    // Brushing is one-way: a second gesture does not start.
    assert!(!c.pointer_down(x0, y0));
}

#[test]
fn degenerate_gesture_does_not_commit() {
    let mut c = chart();
    let price = c.layout().panel(1).expect("price panel").rect;
    let (x, y) = (price.left + 50.0, price.top + 50.0);
    assert!(c.pointer_down(x, y));
    assert!(c.pointer_up(x + 40.0, y).is_none(), "2D brush needs height");
    assert!(c.state().brush_enabled);
    assert_eq!(c.phase(), ViewPhase::IdleDefaultView);
}

#[test]
fn pointer_down_outside_price_panel_is_ignored() {
    let mut c = chart();
    let macd = c.layout().panel(3).expect("macd panel").rect;
    assert!(!c.pointer_down(macd.left + 10.0, macd.bottom - 5.0));
    assert!(!c.is_brushing());
}

#[test]
fn canvas_draw_mode_and_brush_host_follow_the_view() {
    let mut c = chart();
    let canvas = c.canvas();
    assert!(canvas.draw_mode);
    assert_eq!(canvas.brush_rect(), c.layout().panel(1).map(|p| p.rect));

    c.handle_brush(&BrushCoords { x1: date(2012, 3, 1), y1: 27.5, x2: date(2012, 3, 30), y2: 33.0 }.into());
    assert!(!c.canvas().draw_mode);
}

#[test]
fn one_d_pointer_drag_spans_panel_height() {
    let mut c = chart().with_brush_type(BrushType::OneD);
    let price = c.layout().panel(1).expect("price panel").rect;
    assert!(c.pointer_down(price.left + 20.0, price.top + 100.0));
    c.pointer_move(price.left + 200.0, price.top + 100.0);
    let sel = c.canvas().brush_selection.expect("selection while dragging");
    assert_eq!((sel.top, sel.bottom), (price.top, price.bottom));

    let before = c.state().y_extents.clone();
    assert!(c.pointer_up(price.left + 200.0, price.top + 100.0).is_some());
    assert_eq!(c.state().y_extents, before);
}
