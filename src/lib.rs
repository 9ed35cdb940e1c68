// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod analyze;
pub mod api;
pub mod config;
pub mod ingest;
pub mod metrics;
pub mod network;
pub mod params;
pub mod selection;
pub mod session;
pub mod store;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::params::{SearchParameters, WeightInput};
pub use crate::selection::{SelectionEvent, SelectionState};
pub use crate::store::MetricsStore;

use tracing::info;

use crate::config::AppConfig;

/// Build the full application state from config and run the initial load.
///
/// Networks that fail to load are simply absent; an empty population is
/// still a valid (empty) state.
pub async fn bootstrap(cfg: &AppConfig) -> anyhow::Result<AppState> {
    let networks = ingest::config::load_networks_default()?;
    let client = cfg.http_client()?;
    let providers = ingest::http_providers(&networks, &cfg.metrics_base_url, &client);
    ::metrics::gauge!("ingest_networks_configured").set(networks.len() as f64);

    let state = AppState::new(
        MetricsStore::new(),
        cfg.scoring(),
        providers,
    );
    let loaded = state.reload().await;
    info!(
        configured = networks.len(),
        loaded,
        base_url = %cfg.metrics_base_url,
        "initial metrics load finished"
    );
    Ok(state)
}
