// File: crates/candlebrush-core/tests/keyboard.rs
// Purpose: Key listener lifecycle across mount/unmount and Escape cancelling a brush gesture.

mod common;

use candlebrush_core::{
    BrushCoords, BrushType, CandleStickChartWithBrush, CandlestickChartProps, KeyCode, KeyEvent, KeyEventKind, KeyboardHub,
    RenderOptions,
};
use common::{bars_2012, date};

fn chart() -> CandleStickChartWithBrush {
    CandleStickChartWithBrush::new(CandlestickChartProps::new(bars_2012())).expect("valid props")
}

#[test]
fn mount_registers_exactly_one_listener() {
    let hub = KeyboardHub::new();
    let mut c = chart();
    assert!(!c.is_mounted());
    c.mount(&hub);
    c.mount(&hub);
    assert!(c.is_mounted());
    assert_eq!(hub.listener_count(KeyEventKind::Up), 1);
    assert_eq!(hub.listener_count(KeyEventKind::Down), 0);
    assert_eq!(hub.totals(), (1, 0));
}

#[test]
fn rerender_and_prop_updates_do_not_add_listeners() {
    let hub = KeyboardHub::new();
    let mut c = chart();
    c.mount(&hub);
    let mut opts = RenderOptions::default();
    opts.draw_labels = false;
    for _ in 0..3 {
        c.render(&opts).expect("render");
    }
    let mut props = c.props().clone();
    props.width = 800.0;
    c.update_props(props).expect("valid props");
    assert_eq!(hub.totals(), (1, 0));
}

#[test]
fn unmount_removes_listener_once() {
    let hub = KeyboardHub::new();
    let mut c = chart();
    c.mount(&hub);
    c.unmount();
    c.unmount();
    assert!(!c.is_mounted());
    assert_eq!(hub.listener_count(KeyEventKind::Up), 0);
    assert_eq!(hub.totals(), (1, 1));
    drop(c);
    assert_eq!(hub.totals(), (1, 1));
}

#[test]
fn dropping_mounted_chart_removes_listener() {
    let hub = KeyboardHub::new();
    {
        let mut c = chart();
        c.mount(&hub);
        assert_eq!(hub.listener_count(KeyEventKind::Up), 1);
    }
    assert_eq!(hub.listener_count(KeyEventKind::Up), 0);
    assert_eq!(hub.totals(), (1, 1));
}

#[test]
fn remount_after_unmount_registers_again() {
    let hub = KeyboardHub::new();
    let mut c = chart();
    c.mount(&hub);
    c.unmount();
    c.mount(&hub);
    assert_eq!(hub.listener_count(KeyEventKind::Up), 1);
    assert_eq!(hub.totals(), (2, 1));
}

#[test]
fn escape_release_terminates_gesture_and_keeps_extents() {
    let hub = KeyboardHub::new();
    let mut c = chart();
    c.mount(&hub);
    c.handle_brush(&BrushCoords { x1: date(2012, 2, 1), y1: 25.0, x2: date(2012, 4, 2), y2: 33.0 }.into());
    let before = c.state().clone();

    // Brushing is disabled after a commit, so start a gesture on a fresh chart sharing the hub.
    let mut fresh = chart();
    fresh.mount(&hub);
    let price = fresh.layout().panel(1).expect("price panel").rect;
    assert!(fresh.pointer_down(price.left + 10.0, price.top + 10.0));
    fresh.pointer_move(price.left + 90.0, price.top + 90.0);
    assert!(fresh.is_brushing());

    assert_eq!(hub.dispatch(&KeyEvent::up(KeyCode::ESCAPE)), 2);
    assert!(!fresh.is_brushing());
    assert!(fresh.pointer_up(price.left + 90.0, price.top + 90.0).is_none());
    assert!(fresh.state().brush_enabled);
    assert_eq!(c.state(), &before);
}

#[test]
fn other_keys_and_key_down_leave_gesture_alone() {
    let hub = KeyboardHub::new();
    let mut c = chart();
    c.mount(&hub);
    let price = c.layout().panel(1).expect("price panel").rect;
    assert!(c.pointer_down(price.left + 10.0, price.top + 10.0));

    hub.dispatch(&KeyEvent::up(KeyCode(13)));
    assert_eq!(hub.dispatch(&KeyEvent::down(KeyCode::ESCAPE)), 0);
    assert!(c.is_brushing());
}

#[test]
fn escape_while_unmounted_is_ignored() {
    let hub = KeyboardHub::new();
    let mut c = chart();
    c.mount(&hub);
    c.unmount();
    let price = c.layout().panel(1).expect("price panel").rect;
    assert!(c.pointer_down(price.left + 10.0, price.top + 10.0));
    assert_eq!(hub.dispatch(&KeyEvent::up(KeyCode::ESCAPE)), 0);
    assert!(c.is_brushing());
}

#[test]
fn escape_still_cancels_after_brush_type_changes_while_mounted() {
    let hub = KeyboardHub::new();
    let mut c = chart();
    c.mount(&hub);
    let mut c = c.with_brush_type(BrushType::OneD);
    assert_eq!(c.brush_type(), BrushType::OneD);
    assert_eq!(hub.totals(), (1, 0));

    let price = c.layout().panel(1).expect("price panel").rect;
    assert!(c.pointer_down(price.left + 10.0, price.top + 10.0));
    c.pointer_move(price.left + 90.0, price.top + 90.0);
    assert!(c.is_brushing());

    assert_eq!(hub.dispatch(&KeyEvent::up(KeyCode::ESCAPE)), 1);
    assert!(!c.is_brushing());
    assert!(c.pointer_up(price.left + 90.0, price.top + 90.0).is_none());
}

#[test]
fn dom_code_names_map_to_legacy_key_codes() {
    let code = |name: &str| KeyCode::from_dom_code(name).map(|k| k.0);
    assert_eq!(code("Escape"), Some(27));
    assert_eq!(KeyCode::from_dom_code("Escape"), Some(KeyCode::ESCAPE));
    assert_eq!(code("KeyA"), Some(65));
    assert_eq!(code("KeyZ"), Some(90));
    assert_eq!(code("Digit0"), Some(48));
    assert_eq!(code("Numpad7"), Some(103));
    assert_eq!(code("F1"), Some(112));
    assert_eq!(code("F12"), Some(123));
    assert_eq!(code("Enter"), Some(13));
    assert_eq!(code("NumpadEnter"), Some(13));
    assert_eq!(code("ArrowDown"), Some(40));
    assert_eq!(code("F0"), None);
    assert_eq!(code("Keyz"), None);
    assert_eq!(code("Fn"), None);
    assert_eq!(code(""), None);
}

#[test]
fn handle_may_outlive_hub() {
    let hub = KeyboardHub::new();
    let handle = hub.add_listener(KeyEventKind::Up, |_| {});
    drop(hub);
    drop(handle);
}
