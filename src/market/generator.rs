//! Synthetic market data generation.
//!
//! Produces a daily random-walk OHLC series with matching volume points.
//! Used by the dataset store to lazily synthesize data for any symbol that
//! has no real feed behind it.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::object::{CandlePoint, SeriesDataset, VolumePoint};

/// Configuration for the synthetic data generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of daily points to generate.
    pub points: usize,
    /// First day of the series (UTC midnight).
    pub start: DateTime<Utc>,
    /// Starting price of the random walk.
    pub start_price: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            points: 730,
            start: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
            start_price: 100.0,
        }
    }
}

/// Generate a daily random-walk dataset for `symbol`.
///
/// The walk is deterministic per symbol: the rng is seeded from the symbol
/// text, so regenerating the same symbol yields the same dataset.
pub fn generate_dataset(symbol: &str, config: &GeneratorConfig) -> SeriesDataset {
    let mut rng = StdRng::seed_from_u64(symbol_seed(symbol));
    let mut candles = Vec::with_capacity(config.points);
    let mut volumes = Vec::with_capacity(config.points);

    let mut price = config.start_price;
    for ix in 0..config.points {
        let open = price + (rng.random::<f64>() - 0.5) * 2.0;
        let close = open + (rng.random::<f64>() - 0.5) * 2.0;
        let high = open.max(close) + rng.random::<f64>();
        let low = open.min(close) - rng.random::<f64>();
        let datetime = config.start + Duration::days(ix as i64);

        candles.push(CandlePoint {
            datetime,
            open: round2(open),
            high: round2(high),
            low: round2(low),
            close: round2(close),
        });
        volumes.push(VolumePoint {
            datetime,
            volume: (rng.random::<f64>() * 1000.0 + 100.0).round(),
        });

        price = close;
    }

    SeriesDataset::new(candles, volumes).expect("generated series are aligned")
}

fn symbol_seed(symbol: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    symbol.hash(&mut hasher);
    hasher.finish()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
