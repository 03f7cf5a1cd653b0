//! Chart instance lifecycle and state synchronization.
//!
//! `ChartSession` owns the single live chart instance. All creation and
//! destruction goes through it, so "at most one instance" holds at a single
//! choke point instead of being scattered across call sites. The switch
//! protocol is a strict order: capture viewport, destroy, create, restore or
//! resolve, reconcile indicators.

use std::collections::BTreeSet;
use std::rc::Rc;
use tracing::{debug, info, warn};

use super::indicator::{diff_indicators, sma_points, SmaPeriod, SmaToggles};
use super::range::{resolve_window, CustomBounds, RangeSelector, TimeWindow};
use super::renderer::{ChartRenderer, InstanceConfig, InstanceId, SeriesKey, SeriesSpec};
use crate::error::ChartError;
use crate::market::{DatasetStore, SeriesDataset};

/// The single live chart instance and what is attached to it.
struct ActiveChart {
    id: InstanceId,
    symbol: String,
    dataset: Rc<SeriesDataset>,
    smas: BTreeSet<SmaPeriod>,
}

/// Owner of the renderer, the dataset store, and the live chart instance.
pub struct ChartSession<R: ChartRenderer> {
    renderer: R,
    store: DatasetStore,
    active: Option<ActiveChart>,
}

impl<R: ChartRenderer> ChartSession<R> {
    pub fn new(renderer: R) -> Self {
        Self::with_store(renderer, DatasetStore::new())
    }

    pub fn with_store(renderer: R, store: DatasetStore) -> Self {
        Self { renderer, store, active: None }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable renderer access for the embedding layer (frame pumping,
    /// user pan/zoom applied through the rendering backend).
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut DatasetStore {
        &mut self.store
    }

    /// Handle of the live instance, if one exists yet.
    pub fn instance_id(&self) -> Option<InstanceId> {
        self.active.as_ref().map(|active| active.id)
    }

    /// Symbol the live instance is bound to.
    pub fn active_symbol(&self) -> Option<&str> {
        self.active.as_ref().map(|active| active.symbol.as_str())
    }

    /// Dataset the live instance is bound to.
    pub fn active_dataset(&self) -> Option<&Rc<SeriesDataset>> {
        self.active.as_ref().map(|active| &active.dataset)
    }

    /// SMA periods currently attached to the live instance.
    pub fn attached_smas(&self) -> Vec<SmaPeriod> {
        self.active
            .as_ref()
            .map(|active| active.smas.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Current viewport of the live instance.
    pub fn viewport(&self) -> Option<TimeWindow> {
        self.active.as_ref().and_then(|active| self.renderer.viewport(active.id))
    }

    /// Replace the live instance with one bound to `symbol`'s dataset.
    ///
    /// A previously captured viewport is carried over verbatim; only the
    /// first chart ever created falls back to the resolved range window.
    pub fn switch_symbol(
        &mut self,
        symbol: &str,
        toggles: &SmaToggles,
        range: RangeSelector,
        bounds: &CustomBounds,
    ) {
        let symbol = DatasetStore::normalize(symbol);
        let dataset = self.store.get_or_create(&symbol);

        let prev_viewport = self.active.as_ref().and_then(|active| self.renderer.viewport(active.id));
        if let Some(prev) = self.active.take() {
            // take() guarantees the destroy happens exactly once.
            self.renderer.destroy(prev.id);
        }

        let id = self.renderer.create_instance(InstanceConfig {
            title: format!("{} Stock Price", symbol),
            dataset: Rc::clone(&dataset),
        });
        self.active = Some(ActiveChart {
            id,
            symbol: symbol.to_string(),
            dataset,
            smas: BTreeSet::new(),
        });

        match prev_viewport {
            Some(window) => self.renderer.set_viewport(id, window, false),
            None => self.apply_range(range, bounds),
        }

        self.sync_indicators(toggles);
        info!("Chart switched to {}", symbol);
    }

    /// Resolve the selected range and replace the viewport outright.
    ///
    /// Incomplete custom bounds and empty datasets leave the viewport
    /// untouched.
    pub fn apply_range(&mut self, range: RangeSelector, bounds: &CustomBounds) {
        let Some(active) = self.active.as_ref() else {
            return;
        };

        match resolve_window(range, bounds, &active.dataset) {
            Ok(Some(window)) => {
                self.renderer.set_viewport(active.id, window, true);
                debug!("Range {} applied to {}", range, active.symbol);
            }
            Ok(None) => debug!("Custom bounds incomplete; viewport unchanged"),
            Err(ChartError::NoData) => warn!("Dataset for {} is empty; range not applied", active.symbol),
            Err(err) => warn!("Range resolution failed: {}", err),
        }
    }

    /// Reconcile attached SMA overlays against the desired toggle set.
    ///
    /// Captures the viewport before mutating series and restores it verbatim
    /// afterwards, so toggling overlays never resets the user's pan/zoom.
    /// With nothing to add or remove this is a complete no-op.
    pub fn sync_indicators(&mut self, toggles: &SmaToggles) {
        let Some(active) = self.active.as_mut() else {
            return;
        };

        let delta = diff_indicators(toggles, &active.smas);
        if delta.is_empty() {
            return;
        }

        let captured = self.renderer.viewport(active.id);

        for period in &delta.to_remove {
            self.renderer.remove_series(active.id, SeriesKey::Sma(*period), false);
            active.smas.remove(period);
        }
        for period in &delta.to_add {
            let points = sma_points(&active.dataset, *period);
            self.renderer.add_series(
                active.id,
                SeriesSpec::SmaLine { period: *period, color: period.color(), points },
                false,
            );
            active.smas.insert(*period);
        }

        self.renderer.redraw(active.id);
        if let Some(window) = captured {
            self.renderer.set_viewport(active.id, window, false);
        }

        debug!(
            "Indicators reconciled: +{} -{}",
            delta.to_add.len(),
            delta.to_remove.len()
        );
    }
}
