// File: crates/candlebrush-core/tests/common/mod.rs
// Purpose: Deterministic trading-day bars shared by the integration tests.

#![allow(dead_code)]

use candlebrush_core::PriceBar;
use chrono::{Datelike, NaiveDate, Weekday};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Weekday bars for 2012 with a smooth, reproducible price walk.
pub fn bars_2012() -> Vec<PriceBar> {
    bars_from(date(2012, 1, 3), date(2012, 12, 31))
}

pub fn bars_from(start: NaiveDate, end: NaiveDate) -> Vec<PriceBar> {
    let mut out = Vec::new();
    let mut prev_close = 30.0;
    let mut i = 0usize;
    for d in start.iter_days().take_while(|d| *d <= end) {
        if matches!(d.weekday(), Weekday::Sat | Weekday::Sun) { continue; }
        let t = i as f64;
        let close = 30.0 + 3.0 * (t * 0.11).sin() + t * 0.01;
        let open = prev_close;
        let high = open.max(close) + 0.5;
        let low = open.min(close) - 0.5;
        let volume = 4.0e7 + 1.0e7 * (t * 0.3).sin().abs();
        out.push(PriceBar::try_new(d, open, high, low, close, volume).expect("valid bar"));
        prev_close = close;
        i += 1;
    }
    out
}
