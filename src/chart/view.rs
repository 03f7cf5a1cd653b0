//! UI-observable view state and per-slot transition handlers.
//!
//! `ChartView` holds the four state slots (symbol, indicator toggles, range
//! selector, custom bounds) and maps each slot transition onto exactly the
//! session operation it needs. Toggling an overlay never rebuilds the chart,
//! and switching symbols never recomputes the range window redundantly.

use tracing::debug;

use super::base::{format_price, format_volume, PRICE_DECIMALS};
use super::indicator::{legend_entries, LegendEntry, SmaPeriod, SmaToggles};
use super::range::{CustomBounds, RangeSelector};
use super::renderer::ChartRenderer;
use super::session::ChartSession;
use super::setting::ChartSettings;
use crate::market::{DatasetStore, GeneratorConfig, QuoteSummary};

/// The four UI-observable state slots.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub symbol: String,
    pub toggles: SmaToggles,
    pub range: RangeSelector,
    pub custom: CustomBounds,
}

/// Interactive chart control: state slots plus the session they drive.
pub struct ChartView<R: ChartRenderer> {
    state: ViewState,
    session: ChartSession<R>,
}

impl<R: ChartRenderer> ChartView<R> {
    /// Create a view with default settings and show the default symbol.
    pub fn new(renderer: R) -> Self {
        Self::with_settings(renderer, ChartSettings::default())
    }

    /// Create a view from explicit settings and show the default symbol.
    pub fn with_settings(renderer: R, settings: ChartSettings) -> Self {
        let mut store = DatasetStore::with_config(GeneratorConfig {
            points: settings.dataset_points,
            ..Default::default()
        });
        for symbol in &settings.seeded_symbols {
            store.get_or_create(symbol);
        }

        let state = ViewState {
            symbol: DatasetStore::normalize(&settings.default_symbol),
            toggles: settings.default_toggles,
            range: settings.default_range,
            custom: CustomBounds::default(),
        };

        let mut session = ChartSession::with_store(renderer, store);
        session.switch_symbol(&state.symbol, &state.toggles, state.range, &state.custom);

        Self { state, session }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn session(&self) -> &ChartSession<R> {
        &self.session
    }

    /// Select a ticker. Raw input is normalized (uppercase, trimmed);
    /// re-selecting the current symbol is a no-op.
    pub fn set_symbol(&mut self, raw: &str) {
        let symbol = DatasetStore::normalize(raw);
        if symbol == self.state.symbol {
            debug!("Symbol {} unchanged", symbol);
            return;
        }

        self.state.symbol = symbol;
        self.session.switch_symbol(
            &self.state.symbol,
            &self.state.toggles,
            self.state.range,
            &self.state.custom,
        );
    }

    /// Flip one SMA overlay on or off and reconcile the chart.
    pub fn toggle_sma(&mut self, period: SmaPeriod) {
        let active = self.state.toggles.toggle(period);
        debug!("{} {}", period, if active { "enabled" } else { "disabled" });
        self.session.sync_indicators(&self.state.toggles);
    }

    /// Set one SMA overlay state explicitly (checkbox semantics).
    pub fn set_sma(&mut self, period: SmaPeriod, active: bool) {
        self.state.toggles.set(period, active);
        self.session.sync_indicators(&self.state.toggles);
    }

    /// Select a range and replace the viewport outright.
    pub fn set_range(&mut self, range: RangeSelector) {
        self.state.range = range;
        self.session.apply_range(self.state.range, &self.state.custom);
    }

    /// Update the custom start date (empty text clears it) and re-apply the
    /// current range selection.
    pub fn set_custom_start(&mut self, text: &str) {
        self.state.custom.start = non_empty(text);
        self.session.apply_range(self.state.range, &self.state.custom);
    }

    /// Update the custom end date (empty text clears it) and re-apply the
    /// current range selection.
    pub fn set_custom_end(&mut self, text: &str) {
        self.state.custom.end = non_empty(text);
        self.session.apply_range(self.state.range, &self.state.custom);
    }

    /// Legend rows for the active overlays, in canonical order.
    pub fn legend(&self) -> Vec<LegendEntry> {
        legend_entries(&self.state.toggles)
    }

    /// Symbols with cached datasets, for the ticker picker.
    pub fn known_symbols(&self) -> Vec<String> {
        self.session.store().known_symbols()
    }

    /// Latest quote of the current dataset, for the header line.
    pub fn quote_summary(&self) -> Option<QuoteSummary> {
        self.session.active_dataset()?.quote_summary()
    }

    /// Formatted header line, e.g.
    /// `280.60 (-0.74%) O 282.75 H 283.87 L 280.51 C 280.60 Vol 528.5K`.
    pub fn header_line(&self) -> Option<String> {
        let quote = self.quote_summary()?;
        Some(format!(
            "{} ({:+.2}%) O {} H {} L {} C {} Vol {}",
            format_price(quote.close, PRICE_DECIMALS),
            quote.change_percent,
            format_price(quote.open, PRICE_DECIMALS),
            format_price(quote.high, PRICE_DECIMALS),
            format_price(quote.low, PRICE_DECIMALS),
            format_price(quote.close, PRICE_DECIMALS),
            format_volume(quote.volume),
        ))
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::base::DAY_MS;
    use crate::chart::range::TimeWindow;
    use crate::chart::renderer::{MemoryRenderer, RenderOp};

    fn small_settings() -> ChartSettings {
        ChartSettings { dataset_points: 120, ..Default::default() }
    }

    fn view() -> ChartView<MemoryRenderer> {
        ChartView::with_settings(MemoryRenderer::new(), small_settings())
    }

    #[test]
    fn test_new_shows_default_symbol_with_default_range() {
        let view = view();

        assert_eq!(view.state().symbol, "IBM");
        assert_eq!(view.session().active_symbol(), Some("IBM"));
        assert_eq!(view.session().attached_smas(), vec![SmaPeriod::Sma50]);

        let (_, data_max) = view.session().active_dataset().unwrap().time_span().unwrap();
        let viewport = view.session().viewport().unwrap();
        assert_eq!(viewport.max, data_max);
        assert_eq!(viewport.min, data_max - 365 * DAY_MS);
    }

    #[test]
    fn test_seeded_symbols_are_cached_eagerly() {
        let view = view();
        assert_eq!(view.known_symbols(), vec!["AAPL", "GOOG", "IBM"]);
    }

    #[test]
    fn test_set_symbol_normalizes_and_switches() {
        let mut view = view();
        view.set_symbol("  aapl ");

        assert_eq!(view.state().symbol, "AAPL");
        assert_eq!(view.session().active_symbol(), Some("AAPL"));
        assert_eq!(view.session().renderer().live_count(), 1);
    }

    #[test]
    fn test_set_symbol_unchanged_is_noop() {
        let mut view = view();
        let id = view.session().instance_id().unwrap();

        view.set_symbol("ibm");
        assert_eq!(view.session().instance_id(), Some(id));
        assert_eq!(view.session().renderer().destroyed_count(), 0);
    }

    #[test]
    fn test_symbol_switch_preserves_user_viewport() {
        let mut view = view();

        let custom = TimeWindow { min: 123, max: 456 };
        let id = view.session().instance_id().unwrap();
        view.session.renderer_mut().set_viewport(id, custom, false);

        view.set_symbol("GOOG");
        assert_eq!(view.session().viewport(), Some(custom));
    }

    #[test]
    fn test_toggle_sma_reconciles_without_rebuild() {
        let mut view = view();
        let id = view.session().instance_id().unwrap();

        view.toggle_sma(SmaPeriod::Sma10);
        assert_eq!(view.session().attached_smas(), vec![SmaPeriod::Sma10, SmaPeriod::Sma50]);

        view.toggle_sma(SmaPeriod::Sma50);
        assert_eq!(view.session().attached_smas(), vec![SmaPeriod::Sma10]);

        // Same instance throughout: toggling never rebuilds the chart.
        assert_eq!(view.session().instance_id(), Some(id));
    }

    #[test]
    fn test_set_range_replaces_viewport() {
        let mut view = view();
        view.set_range(RangeSelector::OneMonth);

        let (_, data_max) = view.session().active_dataset().unwrap().time_span().unwrap();
        let viewport = view.session().viewport().unwrap();
        assert_eq!(viewport.min, data_max - 30 * DAY_MS);
        assert_eq!(view.state().range, RangeSelector::OneMonth);
    }

    #[test]
    fn test_partial_custom_bounds_keep_viewport() {
        let mut view = view();
        view.set_range(RangeSelector::Custom);
        let before = view.session().viewport();

        view.set_custom_start("2023-02-01");
        assert_eq!(view.session().viewport(), before);

        view.set_custom_end("2023-03-01");
        let after = view.session().viewport().unwrap();
        assert_ne!(Some(after), before);
    }

    #[test]
    fn test_clearing_custom_bound_is_silent() {
        let mut view = view();
        view.set_range(RangeSelector::Custom);
        view.set_custom_start("2023-02-01");
        view.set_custom_end("2023-03-01");
        let applied = view.session().viewport();

        view.set_custom_end("");
        assert_eq!(view.state().custom.end, None);
        assert_eq!(view.session().viewport(), applied);
    }

    #[test]
    fn test_many_switches_never_leak_instances() {
        let mut view = view();

        for symbol in ["AAPL", "GOOG", "MSFT", "IBM", "TSLA", "AAPL"] {
            view.set_symbol(symbol);
        }

        assert_eq!(view.session().renderer().live_count(), 1);
        let destroys = view
            .session()
            .renderer()
            .ops()
            .iter()
            .filter(|op| matches!(op, RenderOp::Destroy(_)))
            .count();
        assert_eq!(destroys, 6);
    }

    #[test]
    fn test_legend_tracks_toggles() {
        let mut view = view();
        view.toggle_sma(SmaPeriod::Sma10);

        let legend = view.legend();
        assert_eq!(legend.len(), 2);
        assert_eq!(legend[0].label, "SMA(10)");
        assert_eq!(legend[1].label, "SMA(50)");
    }

    #[test]
    fn test_quote_summary_present() {
        let view = view();
        let quote = view.quote_summary().unwrap();
        assert!(quote.high >= quote.low);
        assert!(quote.volume >= 100.0);
    }

    #[test]
    fn test_header_line_layout() {
        let view = view();
        let header = view.header_line().unwrap();
        assert!(header.contains("%) O "));
        assert!(header.contains(" Vol "));
    }
}
