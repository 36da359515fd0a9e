// File: crates/candlebrush-core/src/format.rs
// Summary: Number and date formatting used by axes, tooltips and coordinate labels.

use chrono::{Datelike, NaiveDate};

/// Tick/label format for numeric values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberFormat {
    /// Fixed decimals, like `.2f`.
    Fixed(usize),
    /// Significant digits with an SI prefix, like `.4s`. Precision 0 means 1 digit.
    Si(usize),
}

impl NumberFormat {
    pub fn format(&self, v: f64) -> String {
        match *self {
            Self::Fixed(d) => fixed(v, d),
            Self::Si(p) => si(v, p),
        }
    }
}

pub fn fixed(v: f64, decimals: usize) -> String {
    if !v.is_finite() { return "n/a".to_string(); }
    format!("{v:.decimals$}")
}

const SI_PREFIXES: [&str; 17] = ["y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y"];

/// SI-prefixed number with `precision` significant digits (trailing zeros kept).
pub fn si(v: f64, precision: usize) -> String {
    if !v.is_finite() { return "n/a".to_string(); }
    if v == 0.0 { return "0".to_string(); }
    let digits = precision.clamp(1, 21) as i32;

    // Round to significant digits first so 999.96k becomes 1.000M, not 1000k.
    let mag = v.abs().log10().floor() as i32;
    let unit = 10f64.powi(mag - digits + 1);
    let rounded = (v / unit).round() * unit;
    let mag = rounded.abs().log10().floor() as i32;

    let exp3 = (mag.div_euclid(3)).clamp(-8, 8);
    let scaled = rounded / 10f64.powi(exp3 * 3);
    let int_digits = mag - exp3 * 3 + 1;
    let decimals = (digits - int_digits).max(0) as usize;
    format!("{scaled:.decimals$}{}", SI_PREFIXES[(exp3 + 8) as usize])
}

/// `%Y-%m-%d`
pub fn date_ymd(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// Compact label for a time-axis tick: the year when it changes, the month name when the
/// month changes, otherwise the day of month.
pub fn time_tick(d: NaiveDate, previous: Option<NaiveDate>) -> String {
    match previous {
        Some(p) if p.year() == d.year() && p.month() == d.month() => d.format("%d").to_string(),
        Some(p) if p.year() == d.year() => d.format("%b").to_string(),
        _ => d.format("%Y").to_string(),
    }
}
