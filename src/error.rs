//! Error types for the chart engine.

use thiserror::Error;

/// Errors surfaced by the chart engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// The attached dataset has no points, so no time window can be computed.
    #[error("dataset has no points")]
    NoData,

    /// Externally supplied series data violated the dataset invariant.
    #[error("invalid series data: {0}")]
    InvalidData(String),
}
