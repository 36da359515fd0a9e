// File: crates/candlebrush-core/tests/indicators.rs
// Purpose: Moving-average and MACD math, warm-up lengths and the derived-bar pipeline.

mod common;

use candlebrush_core::indicator::{ema_values, macd_values, sma_values};
use candlebrush_core::{ChartError, Indicator, Indicators, PriceBar};
use common::{bars_2012, date};

fn approx(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

#[test]
fn sma_warm_up_and_window_mean() {
    let v = [1.0, 2.0, 3.0, 4.0, 5.0];
    let sma = sma_values(&v, 3);
    assert_eq!(&sma[..2], &[None, None]);
    assert_eq!(sma[2], Some(2.0));
    assert_eq!(sma[3], Some(3.0));
    assert_eq!(sma[4], Some(4.0));
}

#[test]
fn ema_is_seeded_with_sma_then_recurses() {
    let v = [2.0, 4.0, 6.0, 8.0, 12.0];
    let ema = ema_values(&v, 3);
    assert_eq!(&ema[..2], &[None, None]);
    assert_eq!(ema[2], Some(4.0));
    // k = 0.5
    assert_eq!(ema[3], Some(6.0));
    assert_eq!(ema[4], Some(9.0));
}

#[test]
fn degenerate_windows_yield_no_values() {
    let v = [1.0, 2.0];
    assert!(sma_values(&v, 0).iter().all(Option::is_none));
    assert!(ema_values(&v, 5).iter().all(Option::is_none));
    assert!(macd_values(&v, 12, 26, 9).iter().all(Option::is_none));
    assert!(sma_values(&[], 3).is_empty());
}

#[test]
fn macd_divergence_identity_and_warm_up() {
    let closes: Vec<f64> = bars_2012().iter().map(|b| b.close).collect();
    let macd = macd_values(&closes, 12, 26, 9);
    let first = macd.iter().position(Option::is_some).expect("defined after warm-up");
    assert_eq!(first, 25 + 8);

    let fast = ema_values(&closes, 12);
    let slow = ema_values(&closes, 26);
    for (i, p) in macd.iter().enumerate().skip(first) {
        let p = p.expect("defined after warm-up");
        assert!(approx(p.divergence, p.macd - p.signal));
        assert!(approx(p.macd, fast[i].unwrap_or_default() - slow[i].unwrap_or_default()));
    }
}

#[test]
fn pipeline_merges_every_field_without_touching_input() {
    let data = bars_2012();
    let snapshot = data.clone();
    let ind = Indicators::default();
    let out = ind.apply(&data);

    assert_eq!(data, snapshot);
    assert_eq!(out.len(), data.len());
    assert!(out.iter().zip(&data).all(|(c, p)| c.bar == *p));

    assert!(out[24].ema26.is_none() && out[25].ema26.is_some());
    assert!(out[10].ema12.is_none() && out[11].ema12.is_some());
    assert!(out[8].sma_volume50.is_none() && out[9].sma_volume50.is_some());
    assert!(out[32].macd.is_none() && out[33].macd.is_some());

    let mean: f64 = data[..10].iter().map(|b| b.volume).sum::<f64>() / 10.0;
    assert!(approx(out[9].sma_volume50.unwrap_or_default(), mean));

    // Deterministic: a second run over the same input is identical.
    assert_eq!(ind.apply(&data), out);
}

#[test]
fn calculators_carry_fixed_configuration() {
    let ind = Indicators::default();
    assert_eq!((ind.ema26.id, ind.ema26.window_size), (0, 26));
    assert_eq!((ind.ema12.id, ind.ema12.window_size), (1, 12));
    assert_eq!((ind.sma_volume50.id, ind.sma_volume50.window_size), (3, 10));
    assert_eq!((ind.macd.fast, ind.macd.slow, ind.macd.signal), (12, 26, 9));
    let labels: Vec<String> = ind.pipeline().iter().map(|c| c.label()).collect();
    assert_eq!(labels, ["EMA (26)", "EMA (12)", "SMA (10)", "MACD (26, 12, 9)"]);
    assert_eq!(ind.pipeline()[3].id(), None);
}

#[test]
fn price_bar_rejects_broken_ohlc() {
    let d = date(2012, 1, 3);
    assert!(PriceBar::try_new(d, 10.0, 11.0, 9.0, 10.5, 100.0).is_ok());
    assert!(matches!(PriceBar::try_new(d, 10.0, 9.5, 9.0, 10.5, 100.0), Err(ChartError::InvalidBar { .. })));
    assert!(matches!(PriceBar::try_new(d, 10.0, 11.0, 10.2, 10.5, 100.0), Err(ChartError::InvalidBar { .. })));
    assert!(PriceBar::try_new(d, 10.0, 11.0, 9.0, 10.5, -1.0).is_err());
    assert!(PriceBar::try_new(d, f64::NAN, 11.0, 9.0, 10.5, 1.0).is_err());
}
