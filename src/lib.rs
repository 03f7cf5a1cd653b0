//! Chart Engine - An interactive candlestick chart engine written in Rust
//!
//! This crate provides the state core of an interactive price chart:
//!
//! - Market data handling (OHLC + volume datasets, per-symbol cache)
//! - Symbolic time-range resolution (1M/3M/6M/YTD/1Y/All/Custom)
//! - Incremental reconciliation of moving-average overlays
//! - Chart instance lifecycle with viewport carry-over across symbol switches
//!
//! Rendering stays behind the `ChartRenderer` trait; the crate ships a
//! headless `MemoryRenderer` for tests and logic-only embedding.
//!
//! # Quick Start
//!
//! ```
//! use chart_engine::{ChartView, MemoryRenderer, RangeSelector, SmaPeriod};
//!
//! let mut view = ChartView::new(MemoryRenderer::new());
//!
//! view.set_symbol("aapl");
//! view.toggle_sma(SmaPeriod::Sma20);
//! view.set_range(RangeSelector::SixMonths);
//!
//! assert_eq!(view.session().active_symbol(), Some("AAPL"));
//! ```

pub mod chart;
pub mod error;
pub mod logger;
pub mod market;

// Re-export commonly used types
pub use chart::{
    // Range resolution
    resolve_window, CustomBounds, RangeSelector, TimeWindow,
    // Indicators
    diff_indicators, sma_points, IndicatorDelta, LegendEntry, SmaPeriod, SmaToggles,
    // Renderer boundary
    ChartRenderer, InstanceConfig, InstanceId, MemoryRenderer, RenderOp, SeriesKey, SeriesSpec,
    // Session, settings and view
    ChartSession, ChartSettings, ChartView, ViewState,
};
pub use error::ChartError;
pub use market::{
    generate_dataset, CandlePoint, DatasetStore, GeneratorConfig, LinePoint, QuoteSummary,
    SeriesDataset, VolumePoint,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
