// File: crates/candlebrush-core/src/sample.rs
// Summary: Deterministic synthetic daily bars for demos and benchmarks.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::bar::PriceBar;

/// Weekday bars for `year` following a smooth, reproducible price walk.
pub fn daily_bars(year: i32) -> Vec<PriceBar> {
    let Some(start) = NaiveDate::from_ymd_opt(year, 1, 1) else { return Vec::new() };
    let days = start
        .iter_days()
        .take_while(|d| d.year() == year)
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun));

    let mut out = Vec::new();
    let mut prev = 27.0f64;
    for (i, d) in days.enumerate() {
        let t = i as f64;
        let close = 30.0 + 2.5 * (t * 0.09).sin() + 1.2 * (t * 0.31).cos() + t * 0.008;
        let high = prev.max(close) + 0.3 + 0.2 * (t * 0.7).sin().abs();
        let low = prev.min(close) - 0.3 - 0.2 * (t * 0.5).cos().abs();
        let volume = 4.5e7 + 2.0e7 * (t * 0.23).sin().abs();
        if let Ok(bar) = PriceBar::try_new(d, prev, high, low, close, volume) {
            out.push(bar);
        }
        prev = close;
    }
    out
}
