// File: crates/candlebrush-core/src/view.rs
// Visible extents: the x date window and the y bounds (fixed range or series accessors).

use std::fmt;

use chrono::NaiveDate;

use crate::bar::{ChartBar, MacdPoint};
use crate::scale::TimeIndex;

/// Visible time window, inclusive on both ends.
pub type XExtents = (NaiveDate, NaiveDate);

/// Selects which values of a bar bound a panel's y-range.
#[derive(Clone, Copy)]
pub enum YAccessor {
    /// `[high, low]` of the bar.
    HighLow,
    Volume,
    /// A single derived value (EMA, SMA), named for display and comparison.
    Value { name: &'static str, read: fn(&ChartBar) -> Option<f64> },
    /// MACD line, signal and divergence together.
    Macd { read: fn(&ChartBar) -> Option<MacdPoint> },
}

impl YAccessor {
    pub fn value(name: &'static str, read: fn(&ChartBar) -> Option<f64>) -> Self {
        Self::Value { name, read }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::HighLow => "high/low",
            Self::Volume => "volume",
            Self::Value { name, .. } => name,
            Self::Macd { .. } => "macd",
        }
    }

    /// `(min, max)` this accessor contributes for one bar, if it is defined there.
    pub fn extent(&self, bar: &ChartBar) -> Option<(f64, f64)> {
        match self {
            Self::HighLow => Some((bar.low, bar.high)),
            Self::Volume => Some((bar.volume, bar.volume)),
            Self::Value { read, .. } => read(bar).map(|v| (v, v)),
            Self::Macd { read } => read(bar).map(|m| {
                let lo = m.macd.min(m.signal).min(m.divergence);
                let hi = m.macd.max(m.signal).max(m.divergence);
                (lo, hi)
            }),
        }
    }
}

impl PartialEq for YAccessor {
    fn eq(&self, other: &Self) -> bool { self.name() == other.name() }
}

impl fmt::Debug for YAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "YAccessor({})", self.name())
    }
}

/// Y bounds of a panel: either a fixed value range or the series that should fit the view.
#[derive(Clone, Debug, PartialEq)]
pub enum YExtents {
    Accessors(Vec<YAccessor>),
    Range { low: f64, high: f64 },
}

impl YExtents {
    /// Resolve to a concrete `(min, max)` over bars `first..=last`.
    /// `None` when no accessor is defined on any of those bars.
    pub fn resolve(&self, bars: &[ChartBar], first: usize, last: usize) -> Option<(f64, f64)> {
        match self {
            Self::Range { low, high } => Some((low.min(*high), low.max(*high))),
            Self::Accessors(accessors) => {
                let visible = bars.get(first..=last.min(bars.len().saturating_sub(1)))?;
                accessors_range(visible, accessors)
            }
        }
    }
}

/// Union of every accessor's extent over `bars`.
pub fn accessors_range(bars: &[ChartBar], accessors: &[YAccessor]) -> Option<(f64, f64)> {
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    let mut any = false;
    for bar in bars {
        for acc in accessors {
            if let Some((lo, hi)) = acc.extent(bar) {
                y_min = y_min.min(lo);
                y_max = y_max.max(hi);
                any = true;
            }
        }
    }
    if any { Some((y_min, y_max)) } else { None }
}

/// Bars visible inside `x`, as an inclusive index range.
pub fn visible_range(index: &TimeIndex, x: XExtents) -> Option<(usize, usize)> {
    index.range_between(x.0, x.1)
}
