//! Rendering collaborator boundary.
//!
//! The state engine never draws pixels. It drives an implementation of
//! `ChartRenderer` through instance lifecycle and series operations, and the
//! renderer is free to map those onto any drawing backend. `MemoryRenderer`
//! is the in-crate headless implementation: it book-keeps instances, series
//! and viewports, and records every operation for inspection.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;
use uuid::Uuid;

use super::indicator::SmaPeriod;
use super::range::TimeWindow;
use crate::market::{CandlePoint, LinePoint, SeriesDataset, VolumePoint};

/// Opaque handle of one chart instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(Uuid);

impl InstanceId {
    /// Mint a fresh handle. Renderer implementations call this on create.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Configuration for a new chart instance.
#[derive(Debug, Clone)]
pub struct InstanceConfig {
    /// Chart title, e.g. `"IBM Stock Price"`.
    pub title: String,
    /// Base dataset; the renderer installs its candlestick + volume series.
    pub dataset: Rc<SeriesDataset>,
}

/// Key addressing one series within an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeriesKey {
    Ohlc,
    Volume,
    Sma(SmaPeriod),
}

/// Payload of one series handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesSpec {
    Candlestick { name: String, points: Vec<CandlePoint> },
    Volume { name: String, points: Vec<VolumePoint> },
    SmaLine { period: SmaPeriod, color: &'static str, points: Vec<LinePoint> },
}

impl SeriesSpec {
    pub fn key(&self) -> SeriesKey {
        match self {
            SeriesSpec::Candlestick { .. } => SeriesKey::Ohlc,
            SeriesSpec::Volume { .. } => SeriesKey::Volume,
            SeriesSpec::SmaLine { period, .. } => SeriesKey::Sma(*period),
        }
    }
}

/// Rendering collaborator driven by the chart session.
///
/// `redraw` flags mirror the usual charting-library convention: `false`
/// batches the mutation and leaves the screen untouched until an explicit
/// `redraw` call or a mutation with `redraw = true`.
pub trait ChartRenderer {
    fn create_instance(&mut self, config: InstanceConfig) -> InstanceId;
    fn destroy(&mut self, id: InstanceId);
    fn add_series(&mut self, id: InstanceId, spec: SeriesSpec, redraw: bool);
    fn remove_series(&mut self, id: InstanceId, key: SeriesKey, redraw: bool);
    fn viewport(&self, id: InstanceId) -> Option<TimeWindow>;
    fn set_viewport(&mut self, id: InstanceId, window: TimeWindow, redraw: bool);
    fn redraw(&mut self, id: InstanceId);
}

/// One recorded renderer operation.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOp {
    Create(InstanceId),
    Destroy(InstanceId),
    AddSeries(InstanceId, SeriesKey, bool),
    RemoveSeries(InstanceId, SeriesKey, bool),
    SetViewport(InstanceId, TimeWindow, bool),
    Redraw(InstanceId),
}

/// One live chart held by the memory renderer.
#[derive(Debug, Clone)]
pub struct MemoryInstance {
    pub title: String,
    pub series: BTreeMap<SeriesKey, SeriesSpec>,
    pub viewport: Option<TimeWindow>,
}

impl MemoryInstance {
    /// Attached SMA periods, in canonical order.
    pub fn sma_keys(&self) -> Vec<SmaPeriod> {
        self.series
            .keys()
            .filter_map(|key| match key {
                SeriesKey::Sma(period) => Some(*period),
                _ => None,
            })
            .collect()
    }
}

/// Headless renderer keeping everything in memory.
#[derive(Debug, Default)]
pub struct MemoryRenderer {
    instances: HashMap<InstanceId, MemoryInstance>,
    ops: Vec<RenderOp>,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (not yet destroyed) instances.
    pub fn live_count(&self) -> usize {
        self.instances.len()
    }

    pub fn instance(&self, id: InstanceId) -> Option<&MemoryInstance> {
        self.instances.get(&id)
    }

    /// Every operation recorded since creation or the last `clear_ops`.
    pub fn ops(&self) -> &[RenderOp] {
        &self.ops
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Number of recorded destroy operations.
    pub fn destroyed_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, RenderOp::Destroy(_))).count()
    }
}

impl ChartRenderer for MemoryRenderer {
    fn create_instance(&mut self, config: InstanceConfig) -> InstanceId {
        let id = InstanceId::new();

        // Base series are part of instance construction; overlays arrive
        // later through add_series.
        let mut series = BTreeMap::new();
        series.insert(
            SeriesKey::Ohlc,
            SeriesSpec::Candlestick {
                name: config.title.clone(),
                points: config.dataset.candles().to_vec(),
            },
        );
        series.insert(
            SeriesKey::Volume,
            SeriesSpec::Volume {
                name: "Volume".to_string(),
                points: config.dataset.volumes().to_vec(),
            },
        );

        // A fresh chart shows the full data span until a window is applied.
        let viewport = config.dataset.time_span().map(|(min, max)| TimeWindow { min, max });

        self.instances.insert(id, MemoryInstance { title: config.title, series, viewport });
        self.ops.push(RenderOp::Create(id));
        id
    }

    fn destroy(&mut self, id: InstanceId) {
        self.instances.remove(&id).expect("destroy of unknown chart instance");
        self.ops.push(RenderOp::Destroy(id));
    }

    fn add_series(&mut self, id: InstanceId, spec: SeriesSpec, redraw: bool) {
        let instance = self.instances.get_mut(&id).expect("add_series on unknown chart instance");
        let key = spec.key();
        instance.series.insert(key, spec);
        self.ops.push(RenderOp::AddSeries(id, key, redraw));
    }

    fn remove_series(&mut self, id: InstanceId, key: SeriesKey, redraw: bool) {
        let instance =
            self.instances.get_mut(&id).expect("remove_series on unknown chart instance");
        instance.series.remove(&key);
        self.ops.push(RenderOp::RemoveSeries(id, key, redraw));
    }

    fn viewport(&self, id: InstanceId) -> Option<TimeWindow> {
        self.instances.get(&id).and_then(|instance| instance.viewport)
    }

    fn set_viewport(&mut self, id: InstanceId, window: TimeWindow, redraw: bool) {
        let instance =
            self.instances.get_mut(&id).expect("set_viewport on unknown chart instance");
        instance.viewport = Some(window);
        self.ops.push(RenderOp::SetViewport(id, window, redraw));
    }

    fn redraw(&mut self, id: InstanceId) {
        self.ops.push(RenderOp::Redraw(id));
    }
}
