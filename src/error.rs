//! Error type shared by the loader, filter and session layers.

use thiserror::Error;

/// Errors surfaced by the bikeshare pipeline.
///
/// An empty record collection is not an error: every summary has a
/// well-defined empty result instead.
#[derive(Error, Debug)]
pub enum BikeshareError {
    #[error("unknown city: {0:?} (expected chicago, new york city or washington)")]
    UnknownCity(String),

    #[error("invalid {dimension} filter value: {value:?}")]
    InvalidFilterValue {
        dimension: &'static str,
        value: String,
    },

    #[error("row {row}: cannot parse timestamp {value:?}")]
    InvalidTimestamp { row: usize, value: String },

    #[error("no data file configured for city {0:?}")]
    MissingCityConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BikeshareError>;
