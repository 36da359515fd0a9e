// File: crates/candlebrush-core/src/grid.rs
// Summary: Tick layout helpers.

/// Round tick values covering `[min, max]`, aiming for about `count` ticks.
/// Steps are 1, 2 or 5 times a power of ten; every returned tick lies inside the range.
pub fn nice_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || count == 0 { return Vec::new(); }
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let span = hi - lo;
    if span < 1e-12 { return vec![lo]; }

    let raw = span / count as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let unit = if norm < 1.5 { 1.0 } else if norm < 3.0 { 2.0 } else if norm < 7.0 { 5.0 } else { 10.0 };
    let step = unit * mag;

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

/// Evenly spaced indices over `[start, end]`, at most `count` of them.
pub fn index_ticks(start: usize, end: usize, count: usize) -> Vec<usize> {
    if end < start || count == 0 { return Vec::new(); }
    let span = end - start;
    let step = (span / count.max(1)).max(1);
    (start..=end).step_by(step).collect()
}
