//! Basic data structures for chart market data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// A single OHLC point of the base price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandlePoint {
    pub datetime: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// A single volume point, parallel to the OHLC series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumePoint {
    pub datetime: DateTime<Utc>,
    pub volume: f64,
}

/// A single point of a derived line series (indicator overlay).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub datetime: DateTime<Utc>,
    pub value: f64,
}

/// Snapshot of the latest quote, derived from the tail of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuoteSummary {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Percent change of the last close against the previous close.
    pub change_percent: f64,
    pub volume: f64,
}

/// Immutable per-symbol dataset: OHLC candles and parallel volume points.
///
/// Invariant: both sequences share identical, strictly increasing timestamps
/// and have equal length. Checked once at construction; the dataset is never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesDataset {
    candles: Vec<CandlePoint>,
    volumes: Vec<VolumePoint>,
}

impl SeriesDataset {
    /// Create a dataset, validating the timestamp alignment invariant.
    pub fn new(candles: Vec<CandlePoint>, volumes: Vec<VolumePoint>) -> Result<Self, ChartError> {
        if candles.len() != volumes.len() {
            return Err(ChartError::InvalidData(format!(
                "candle and volume lengths differ: {} vs {}",
                candles.len(),
                volumes.len()
            )));
        }

        for (ix, (candle, volume)) in candles.iter().zip(&volumes).enumerate() {
            if candle.datetime != volume.datetime {
                return Err(ChartError::InvalidData(format!(
                    "candle and volume timestamps differ at index {}",
                    ix
                )));
            }

            if ix > 0 && candles[ix - 1].datetime >= candle.datetime {
                return Err(ChartError::InvalidData(format!(
                    "timestamps are not strictly increasing at index {}",
                    ix
                )));
            }
        }

        Ok(Self { candles, volumes })
    }

    /// OHLC points, ordered by time.
    pub fn candles(&self) -> &[CandlePoint] {
        &self.candles
    }

    /// Volume points, parallel to the candles.
    pub fn volumes(&self) -> &[VolumePoint] {
        &self.volumes
    }

    /// Number of points in each sequence.
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// First and last timestamps in epoch milliseconds, or `None` when empty.
    pub fn time_span(&self) -> Option<(i64, i64)> {
        let first = self.candles.first()?;
        let last = self.candles.last()?;
        Some((first.datetime.timestamp_millis(), last.datetime.timestamp_millis()))
    }

    /// Latest quote for the header line, or `None` when empty.
    ///
    /// The percent change compares the last close against the previous close;
    /// a single-point dataset compares against its own open.
    pub fn quote_summary(&self) -> Option<QuoteSummary> {
        let last = self.candles.last()?;
        let volume = self.volumes.last()?.volume;

        let reference = if self.candles.len() >= 2 {
            self.candles[self.candles.len() - 2].close
        } else {
            last.open
        };
        let change_percent = if reference != 0.0 {
            (last.close - reference) / reference * 100.0
        } else {
            0.0
        };

        Some(QuoteSummary {
            open: last.open,
            high: last.high,
            low: last.low,
            close: last.close,
            change_percent,
            volume,
        })
    }
}
