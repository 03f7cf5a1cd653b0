//! Per-symbol dataset cache.

use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

use super::generator::{generate_dataset, GeneratorConfig};
use super::object::SeriesDataset;

/// Lazily populated symbol -> dataset cache.
///
/// Datasets are generated on first reference to an unseen symbol and never
/// mutated afterwards; the same symbol always yields the same cached dataset
/// within a session.
pub struct DatasetStore {
    config: GeneratorConfig,
    datasets: HashMap<String, Rc<SeriesDataset>>,
}

impl Default for DatasetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetStore {
    /// Create an empty store with the default generator configuration.
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    /// Create an empty store with a custom generator configuration.
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config, datasets: HashMap::new() }
    }

    /// Normalize a raw symbol: uppercase, trimmed.
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_uppercase()
    }

    /// Resolve the dataset for `symbol`, synthesizing it on first reference.
    pub fn get_or_create(&mut self, symbol: &str) -> Rc<SeriesDataset> {
        let key = Self::normalize(symbol);

        if let Some(dataset) = self.datasets.get(&key) {
            return Rc::clone(dataset);
        }

        debug!("Generating dataset for {}", key);
        let dataset = Rc::new(generate_dataset(&key, &self.config));
        self.datasets.insert(key, Rc::clone(&dataset));
        dataset
    }

    /// Whether a dataset is already cached for `symbol`.
    pub fn contains(&self, symbol: &str) -> bool {
        self.datasets.contains_key(&Self::normalize(symbol))
    }

    /// Symbols with cached datasets, sorted alphabetically.
    pub fn known_symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.datasets.keys().cloned().collect();
        symbols.sort();
        symbols
    }
}
