use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};

use crate::ingest::table::parse_metric_table;
use crate::ingest::types::{MetricsProvider, NetworkMetrics};
use crate::network::NetworkSpec;

/// Fetches `{base_url}/{slug}.csv` for one network.
pub struct HttpTableProvider {
    network: NetworkSpec,
    url: String,
    client: reqwest::Client,
}

impl HttpTableProvider {
    pub fn new(network: NetworkSpec, base_url: &str, client: reqwest::Client) -> Self {
        let url = table_url(base_url, &network.slug);
        Self {
            network,
            url,
            client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

pub fn table_url(base_url: &str, slug: &str) -> String {
    format!("{}/{}.csv", base_url.trim_end_matches('/'), slug)
}

#[async_trait]
impl MetricsProvider for HttpTableProvider {
    async fn fetch_row(&self) -> Result<NetworkMetrics> {
        let t0 = std::time::Instant::now();
        counter!("ingest_fetch_total").increment(1);

        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("GET {}", self.url))?
            .error_for_status()
            .with_context(|| format!("non-success status from {}", self.url))?;
        let body = resp
            .text()
            .await
            .with_context(|| format!("reading body of {}", self.url))?;
        let row = parse_metric_table(&body)
            .with_context(|| format!("parsing metric table for {}", self.network.name))?;

        histogram!("ingest_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        Ok(NetworkMetrics {
            name: self.network.name.clone(),
            row,
        })
    }

    fn name(&self) -> &str {
        &self.network.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        assert_eq!(
            table_url("http://host/data/", "cosmos_hub"),
            "http://host/data/cosmos_hub.csv"
        );
        assert_eq!(table_url("http://host", "akash"), "http://host/akash.csv");
    }
}
