//! # Metrics Store
//! Holds the population of one load cycle. A load replaces the whole
//! snapshot; readers keep whatever `Arc` they already hold.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use crate::ingest::types::NetworkMetrics;
use crate::network::same_network;

/// Immutable snapshot of every network that ingested successfully.
#[derive(Debug, Clone, Default)]
pub struct Population {
    pub networks: Vec<NetworkMetrics>,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl Population {
    pub fn new(networks: Vec<NetworkMetrics>) -> Self {
        Self {
            networks,
            loaded_at: Some(Utc::now()),
        }
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&NetworkMetrics> {
        self.networks.iter().find(|n| same_network(&n.name, name))
    }
}

/// Shared handle to the current population.
#[derive(Debug, Clone, Default)]
pub struct MetricsStore {
    inner: Arc<RwLock<Arc<Population>>>,
}

impl MetricsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_population(networks: Vec<NetworkMetrics>) -> Self {
        let store = Self::new();
        store.replace(networks);
        store
    }

    /// Swap in a freshly loaded population. Concurrent loads resolve as
    /// last-settled-wins.
    pub fn replace(&self, networks: Vec<NetworkMetrics>) {
        let fresh = Arc::new(Population::new(networks));
        match self.inner.write() {
            Ok(mut g) => *g = fresh,
            Err(poisoned) => *poisoned.into_inner() = fresh,
        }
    }

    pub fn snapshot(&self) -> Arc<Population> {
        match self.inner.read() {
            Ok(g) => Arc::clone(&g),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }
}
