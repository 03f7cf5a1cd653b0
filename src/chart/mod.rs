//! Chart state synchronization module.
//!
//! This module provides:
//! - `RangeSelector` / `resolve_window` - Symbolic time-range resolution
//! - `SmaPeriod` / `SmaToggles` - Indicator toggles and reconciliation deltas
//! - `ChartRenderer` - Boundary trait of the rendering collaborator
//! - `ChartSession` - Chart instance lifecycle with viewport carry-over
//! - `ChartView` - UI-observable state store driving the session
//!
//! # Example
//!
//! ```
//! use chart_engine::chart::{ChartView, MemoryRenderer, RangeSelector, SmaPeriod};
//!
//! let mut view = ChartView::new(MemoryRenderer::new());
//! view.set_symbol("aapl");
//! view.toggle_sma(SmaPeriod::Sma20);
//! view.set_range(RangeSelector::SixMonths);
//! ```

mod base;
mod indicator;
mod range;
mod renderer;
mod session;
mod setting;
mod view;

pub use base::*;
pub use indicator::{
    diff_indicators, legend_entries, sma_points, IndicatorDelta, LegendEntry, SmaPeriod,
    SmaToggles,
};
pub use range::{resolve_window, CustomBounds, RangeSelector, TimeWindow};
pub use renderer::{
    ChartRenderer, InstanceConfig, InstanceId, MemoryInstance, MemoryRenderer, RenderOp,
    SeriesKey, SeriesSpec,
};
pub use session::ChartSession;
pub use setting::ChartSettings;
pub use view::{ChartView, ViewState};
