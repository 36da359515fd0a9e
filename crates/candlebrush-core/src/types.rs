// File: crates/candlebrush-core/src/types.rs
// Summary: Shared types and constants (canvas size, margins, render type).

use std::fmt;
use std::str::FromStr;

/// Default canvas width in CSS pixels when no host width is known.
pub const WIDTH: f32 = 1024.0;
/// Canvas height in CSS pixels; the three panels are laid out inside it.
pub const HEIGHT: f32 = 600.0;

/// Canvas margins, in CSS pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(70, 70, 20, 30)
    }
}

/// Vertical padding inside a panel, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Padding {
    pub top: u32,
    pub bottom: u32,
}

impl Padding {
    pub const fn new(top: u32, bottom: u32) -> Self { Self { top, bottom } }
}

/// Output flavour of a render: a scalable SVG document or a pixel image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RenderType {
    #[default]
    Vector,
    Raster,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRenderType(pub String);

impl fmt::Display for UnknownRenderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown render type '{}'", self.0)
    }
}

impl std::error::Error for UnknownRenderType {}

impl FromStr for RenderType {
    type Err = UnknownRenderType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vector" | "svg" => Ok(Self::Vector),
            "raster" | "hybrid" | "canvas" | "png" => Ok(Self::Raster),
            other => Err(UnknownRenderType(other.to_string())),
        }
    }
}

impl RenderType {
    /// Resolve an optional prop value; missing or unrecognised values fall back to `Vector`.
    pub fn from_prop(value: Option<&str>) -> Self {
        match value.map(str::parse::<RenderType>) {
            None => Self::default(),
            Some(Ok(t)) => t,
            Some(Err(e)) => {
                tracing::warn!(%e, "falling back to vector rendering");
                Self::default()
            }
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Vector => "svg",
            Self::Raster => "png",
        }
    }
}

impl fmt::Display for RenderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vector => "vector",
            Self::Raster => "raster",
        })
    }
}
