// File: crates/candlebrush-core/src/scale.rs
// Summary: Discontinuous time (X) and linear value (Y) scale transforms.
// Notes:
// - X is laid out over bar indices, so days without bars take no horizontal space.
//   `TimeIndex` translates between dates and indices.

use chrono::NaiveDate;

/// Logical X coordinate: a (fractional) bar index.
pub type Logical = f64;
/// Value Y coordinate (e.g., price).
pub type Value = f64;

/// Date <-> bar index lookup over a chronological series.
#[derive(Clone, Debug, Default)]
pub struct TimeIndex {
    dates: Vec<NaiveDate>,
}

impl TimeIndex {
    pub fn new(dates: Vec<NaiveDate>) -> Self { Self { dates } }

    pub fn len(&self) -> usize { self.dates.len() }
    pub fn is_empty(&self) -> bool { self.dates.is_empty() }

    pub fn date_at(&self, index: usize) -> Option<NaiveDate> { self.dates.get(index).copied() }

    /// Index of the first bar on or after `date`.
    pub fn lower_bound(&self, date: NaiveDate) -> usize {
        self.dates.partition_point(|d| *d < date)
    }

    /// Index of the last bar on or before `date`, if any.
    pub fn upper_bound(&self, date: NaiveDate) -> Option<usize> {
        self.dates.partition_point(|d| *d <= date).checked_sub(1)
    }

    /// Bar indices inside `[from, to]` (inclusive), or `None` when no bar falls in it.
    pub fn range_between(&self, from: NaiveDate, to: NaiveDate) -> Option<(usize, usize)> {
        let (from, to) = if from <= to { (from, to) } else { (to, from) };
        let start = self.lower_bound(from);
        let end = self.upper_bound(to)?;
        (start <= end && start < self.dates.len()).then_some((start, end))
    }

    /// Round a logical coordinate to the nearest existing bar index.
    pub fn nearest_index(&self, x: Logical) -> Option<usize> {
        if self.dates.is_empty() { return None; }
        let max = (self.dates.len() - 1) as f64;
        Some(x.round().clamp(0.0, max) as usize)
    }

    pub fn nearest_date(&self, x: Logical) -> Option<NaiveDate> {
        self.nearest_index(x).and_then(|i| self.date_at(i))
    }
}

/// Horizontal scale mapping a logical index domain onto `[left_px, right_px]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    pub left_px: f32,
    pub right_px: f32,
    pub start_logical: Logical,
    pub end_logical: Logical,
}

impl TimeScale {
    /// Scale showing bars `first..=last`, with half a bar of room on each side.
    pub fn for_bars(left_px: f32, right_px: f32, first: usize, last: usize) -> Self {
        Self {
            left_px,
            right_px,
            start_logical: first as f64 - 0.5,
            end_logical: last.max(first) as f64 + 0.5,
        }
    }
    /// Pixels per bar.
    #[inline]
    pub fn bar_spacing(&self) -> f32 {
        let span = (self.end_logical - self.start_logical).max(1e-9);
        (self.right_px - self.left_px) / span as f32
    }
    #[inline]
    pub fn to_px(&self, x: Logical) -> f32 {
        self.left_px + ((x - self.start_logical) as f32) * self.bar_spacing()
    }
    #[inline]
    pub fn from_px(&self, px: f32) -> Logical {
        self.start_logical + ((px - self.left_px) / self.bar_spacing()) as f64
    }
}

/// Vertical value scale mapping data range to [top, bottom] pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmin: Value,
    pub vmax: Value,
}

impl ValueScale {
    pub fn new_linear(top_px: f32, bottom_px: f32, vmin: Value, vmax: Value) -> Self {
        let mut s = Self { top_px, bottom_px, vmin, vmax };
        if (s.vmax - s.vmin).abs() < 1e-12 { s.vmax = s.vmin + 1.0; }
        s
    }
    #[inline]
    pub fn to_px(&self, y: Value) -> f32 {
        let span = (self.vmax - self.vmin).max(1e-12);
        self.bottom_px - ((y - self.vmin) / span) as f32 * (self.bottom_px - self.top_px)
    }
    #[inline]
    pub fn from_px(&self, py: f32) -> Value {
        let span = (self.vmax - self.vmin).max(1e-12);
        self.vmin + ((self.bottom_px - py) / (self.bottom_px - self.top_px).max(1e-6)) as f64 * span
    }
}
