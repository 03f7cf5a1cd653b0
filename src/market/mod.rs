//! Market data module: series datasets, synthetic generation, per-symbol cache.
//!
//! This module provides:
//! - `SeriesDataset` - Immutable OHLC + volume series with aligned timestamps
//! - `generate_dataset` - Daily random-walk data for symbols without a feed
//! - `DatasetStore` - Lazily populated symbol -> dataset cache

mod generator;
mod object;
mod store;

pub use generator::{generate_dataset, GeneratorConfig};
pub use object::{CandlePoint, LinePoint, QuoteSummary, SeriesDataset, VolumePoint};
pub use store::DatasetStore;
