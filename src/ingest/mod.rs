// src/ingest/mod.rs
pub mod config;
pub mod providers;
pub mod table;
pub mod types;

use futures_util::future::join_all;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use once_cell::sync::OnceCell;

use crate::ingest::providers::HttpTableProvider;
use crate::ingest::types::{MetricsProvider, NetworkMetrics};
use crate::network::NetworkSpec;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("ingest_fetch_total", "Metric table fetch attempts.");
        describe_counter!(
            "ingest_fetch_errors_total",
            "Fetch/parse failures; the network is dropped for this load."
        );
        describe_histogram!("ingest_fetch_ms", "Successful fetch+parse time in milliseconds.");
        describe_gauge!(
            "ingest_networks_loaded",
            "Networks in the population after the last load."
        );
        describe_gauge!("ingest_last_run_ts", "Unix ts when ingestion last settled.");
    });
}

/// One HTTP provider per configured network.
pub fn http_providers(
    networks: &[NetworkSpec],
    base_url: &str,
    client: &reqwest::Client,
) -> Vec<Box<dyn MetricsProvider>> {
    networks
        .iter()
        .map(|n| {
            Box::new(HttpTableProvider::new(n.clone(), base_url, client.clone()))
                as Box<dyn MetricsProvider>
        })
        .collect()
}

/// Fetch every provider concurrently and wait until all attempts settle.
///
/// Failed networks are logged and dropped, never retried. The result keeps
/// the providers' order so downstream stable sorts are deterministic.
pub async fn run_once(providers: &[Box<dyn MetricsProvider>]) -> Vec<NetworkMetrics> {
    ensure_metrics_described();

    let attempts = providers.iter().map(|p| async move {
        match p.fetch_row().await {
            Ok(m) => Some(m),
            Err(e) => {
                tracing::warn!(target: "ingest", error = ?e, network = p.name(), "network dropped");
                counter!("ingest_fetch_errors_total").increment(1);
                None
            }
        }
    });
    let settled = join_all(attempts).await;
    let attempted = settled.len();
    let rows: Vec<NetworkMetrics> = settled.into_iter().flatten().collect();

    let now = chrono::Utc::now().timestamp().max(0);
    gauge!("ingest_networks_loaded").set(rows.len() as f64);
    gauge!("ingest_last_run_ts").set(now as f64);
    tracing::info!(
        target: "ingest",
        attempted,
        loaded = rows.len(),
        dropped = attempted - rows.len(),
        "ingestion settled"
    );

    rows
}
