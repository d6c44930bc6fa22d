//! Registry of placement strategies keyed by identifier.
//!
//! Build one at startup, register the strategies the application needs and pass it by
//! reference to whatever resolves strategies by name.
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::strategy::clustered::{ClusteredPlacement, CLUSTERED_STRATEGY_ID};
use crate::strategy::random::{RandomPlacement, RANDOM_STRATEGY_ID};
use crate::strategy::PlacementStrategy;

/// Lookup table from strategy identifier to strategy instance.
#[non_exhaustive]
pub struct StrategyRegistry {
    strategies: HashMap<String, Arc<dyn PlacementStrategy>>,
}

impl fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("strategies", &self.list())
            .finish()
    }
}

impl StrategyRegistry {
    /// Creates a new, empty [`StrategyRegistry`].
    pub fn new() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Creates a registry holding the built-in `"random"` and `"clustered"` strategies.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(RANDOM_STRATEGY_ID, RandomPlacement);
        registry.register(CLUSTERED_STRATEGY_ID, ClusteredPlacement);
        registry
    }

    /// Returns the number of registered strategies.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Returns `true` if there are no registered strategies.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Registers a strategy under `id`, replacing any previous one.
    pub fn register<S>(&mut self, id: impl Into<String>, strategy: S)
    where
        S: PlacementStrategy + 'static,
    {
        self.strategies.insert(id.into(), Arc::new(strategy));
    }

    /// Registers a strategy using an [`Arc`], replacing any previous one.
    pub fn register_arc(&mut self, id: impl Into<String>, strategy: Arc<dyn PlacementStrategy>) {
        self.strategies.insert(id.into(), strategy);
    }

    /// Unregisters a strategy. Returns `true` if it was found and removed.
    pub fn unregister(&mut self, id: &str) -> bool {
        self.strategies.remove(id).is_some()
    }

    /// Checks if a strategy with the given identifier exists.
    pub fn contains(&self, id: &str) -> bool {
        self.strategies.contains_key(id)
    }

    /// Retrieves a strategy by identifier.
    ///
    /// An unknown identifier means the strategy was never registered and is reported as
    /// [`Error::UnknownStrategy`].
    pub fn get(&self, id: &str) -> Result<Arc<dyn PlacementStrategy>> {
        self.strategies
            .get(id)
            .cloned()
            .ok_or_else(|| Error::UnknownStrategy { id: id.to_owned() })
    }

    /// The `"random"` strategy.
    pub fn default_strategy(&self) -> Result<Arc<dyn PlacementStrategy>> {
        self.get(RANDOM_STRATEGY_ID)
    }

    /// Registered identifiers in sorted order.
    pub fn list(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.strategies.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
