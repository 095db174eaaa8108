//! Unified error type for data loading and aggregation.

use thiserror::Error;

/// Errors surfaced by the data layer and the aggregation engine.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The HTTP request failed or returned a non-2xx status.
    #[error("data request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not a valid JSON sample array.
    #[error("malformed sample payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// A sample carried a timestamp that could not be parsed as ISO-8601.
    /// Rejected at ingestion so bucket keys are never derived from an
    /// invalid date.
    #[error("invalid timestamp {timestamp:?}")]
    InvalidTimestamp { timestamp: String },
}

impl ChartError {
    pub(crate) fn invalid_timestamp(raw: &str) -> Self {
        Self::InvalidTimestamp {
            timestamp: raw.to_string(),
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ChartError>;
