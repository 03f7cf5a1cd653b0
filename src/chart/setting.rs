//! View settings and defaults.

use serde::{Deserialize, Serialize};

use super::indicator::SmaToggles;
use super::range::RangeSelector;

/// Initial configuration of a chart view.
///
/// Every field has a default, so partial JSON documents deserialize with the
/// remaining fields filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Symbol selected when the view starts.
    pub default_symbol: String,
    /// Range selector applied when no viewport exists yet.
    pub default_range: RangeSelector,
    /// Initially active SMA overlays.
    pub default_toggles: SmaToggles,
    /// Symbols whose datasets are generated eagerly at startup.
    pub seeded_symbols: Vec<String>,
    /// Number of daily points per synthesized dataset.
    pub dataset_points: usize,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            default_symbol: "IBM".to_string(),
            default_range: RangeSelector::OneYear,
            default_toggles: SmaToggles::default(),
            seeded_symbols: vec!["IBM".to_string(), "AAPL".to_string(), "GOOG".to_string()],
            dataset_points: 730,
        }
    }
}

impl ChartSettings {
    /// Load settings from a JSON document.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serialize settings to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
