//! Moving-average overlays for the chart.
//!
//! The supported SMA periods form a fixed, closed enumeration; requests for
//! anything outside it are rejected at the boundary. Reconciliation against
//! the attached series set is expressed as a minimal add/remove delta.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use ta::indicators::SimpleMovingAverage;
use ta::Next;

use super::base::{SMA_100_COLOR, SMA_10_COLOR, SMA_20_COLOR, SMA_50_COLOR};
use crate::market::{LinePoint, SeriesDataset};

/// Supported SMA periods.
///
/// Declaration order is the canonical ordering used for legend entries and
/// for series stacking when several overlays are added at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SmaPeriod {
    Sma10,
    Sma20,
    Sma50,
    Sma100,
}

impl SmaPeriod {
    /// All supported periods, in canonical order.
    pub fn all() -> [SmaPeriod; 4] {
        [SmaPeriod::Sma10, SmaPeriod::Sma20, SmaPeriod::Sma50, SmaPeriod::Sma100]
    }

    /// Window length in candles.
    pub fn window(self) -> usize {
        match self {
            SmaPeriod::Sma10 => 10,
            SmaPeriod::Sma20 => 20,
            SmaPeriod::Sma50 => 50,
            SmaPeriod::Sma100 => 100,
        }
    }

    /// Fixed overlay color for this period.
    pub fn color(self) -> &'static str {
        match self {
            SmaPeriod::Sma10 => SMA_10_COLOR,
            SmaPeriod::Sma20 => SMA_20_COLOR,
            SmaPeriod::Sma50 => SMA_50_COLOR,
            SmaPeriod::Sma100 => SMA_100_COLOR,
        }
    }

    /// Map a raw window length onto the enumeration.
    ///
    /// Anything outside the supported set yields `None` and is ignored by
    /// callers; the enumeration is closed.
    pub fn from_window(window: usize) -> Option<SmaPeriod> {
        SmaPeriod::all().into_iter().find(|period| period.window() == window)
    }
}

impl fmt::Display for SmaPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SMA {}", self.window())
    }
}

/// Active/inactive flags for every supported period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmaToggles {
    sma10: bool,
    sma20: bool,
    sma50: bool,
    sma100: bool,
}

impl Default for SmaToggles {
    /// The 50-period overlay starts enabled.
    fn default() -> Self {
        Self { sma10: false, sma20: false, sma50: true, sma100: false }
    }
}

impl SmaToggles {
    /// All overlays off.
    pub fn none() -> Self {
        Self { sma10: false, sma20: false, sma50: false, sma100: false }
    }

    pub fn is_active(&self, period: SmaPeriod) -> bool {
        match period {
            SmaPeriod::Sma10 => self.sma10,
            SmaPeriod::Sma20 => self.sma20,
            SmaPeriod::Sma50 => self.sma50,
            SmaPeriod::Sma100 => self.sma100,
        }
    }

    pub fn set(&mut self, period: SmaPeriod, active: bool) {
        match period {
            SmaPeriod::Sma10 => self.sma10 = active,
            SmaPeriod::Sma20 => self.sma20 = active,
            SmaPeriod::Sma50 => self.sma50 = active,
            SmaPeriod::Sma100 => self.sma100 = active,
        }
    }

    /// Flip one period and return its new state.
    pub fn toggle(&mut self, period: SmaPeriod) -> bool {
        let next = !self.is_active(period);
        self.set(period, next);
        next
    }

    /// Active periods, in canonical order.
    pub fn active_periods(&self) -> Vec<SmaPeriod> {
        SmaPeriod::all().into_iter().filter(|period| self.is_active(*period)).collect()
    }
}

/// Minimal add/remove delta between desired toggles and attached series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorDelta {
    pub to_add: Vec<SmaPeriod>,
    pub to_remove: Vec<SmaPeriod>,
}

impl IndicatorDelta {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Compute which overlay series must be added or removed.
///
/// `to_add` is produced in canonical period order so that multiple additions
/// in one reconciliation stack deterministically.
pub fn diff_indicators(desired: &SmaToggles, current: &BTreeSet<SmaPeriod>) -> IndicatorDelta {
    let mut delta = IndicatorDelta::default();

    for period in SmaPeriod::all() {
        let want = desired.is_active(period);
        let have = current.contains(&period);

        if want && !have {
            delta.to_add.push(period);
        } else if !want && have {
            delta.to_remove.push(period);
        }
    }

    delta
}

/// Simple moving average of the close series, aligned to candle timestamps.
///
/// The first emitted point belongs to the first candle with a full window
/// behind it; earlier candles produce no value.
pub fn sma_points(dataset: &SeriesDataset, period: SmaPeriod) -> Vec<LinePoint> {
    let window = period.window();
    let candles = dataset.candles();
    if candles.len() < window {
        return Vec::new();
    }

    let mut indicator = SimpleMovingAverage::new(window).unwrap();
    let mut points = Vec::with_capacity(candles.len() - window + 1);

    for (ix, candle) in candles.iter().enumerate() {
        let value = indicator.next(candle.close);
        if ix + 1 >= window {
            points.push(LinePoint { datetime: candle.datetime, value });
        }
    }

    points
}

/// One legend row for an active overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub period: SmaPeriod,
    pub label: String,
    pub color: &'static str,
}

/// Legend rows for the active overlays, in canonical order.
pub fn legend_entries(toggles: &SmaToggles) -> Vec<LegendEntry> {
    toggles
        .active_periods()
        .into_iter()
        .map(|period| LegendEntry {
            period,
            label: format!("SMA({})", period.window()),
            color: period.color(),
        })
        .collect()
}
