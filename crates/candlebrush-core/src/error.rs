// File: crates/candlebrush-core/src/error.rs
// Summary: Error type shared by the data model, component props and render pipeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    /// Component props failed validation (non-positive width/ratio, empty data).
    #[error("invalid props: {0}")]
    InvalidProps(String),

    /// A price bar violated its OHLC invariants.
    #[error("invalid bar at {date}: {reason}")]
    InvalidBar { date: chrono::NaiveDate, reason: &'static str },

    #[error("no price bars supplied")]
    EmptyData,

    #[error("failed to create {0} surface")]
    Surface(&'static str),

    #[error("encoding {format} failed: {reason}")]
    Encode { format: &'static str, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;
