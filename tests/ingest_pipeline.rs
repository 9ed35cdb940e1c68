// tests/ingest_pipeline.rs
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use validscope::ingest::providers::StaticTableProvider;
use validscope::ingest::types::{MetricsProvider, NetworkMetrics, RawMetricRow};
use validscope::ingest::run_once;

struct SlowProvider {
    name: &'static str,
    delay_ms: u64,
    apr: f64,
}

#[async_trait]
impl MetricsProvider for SlowProvider {
    async fn fetch_row(&self) -> Result<NetworkMetrics> {
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        Ok(NetworkMetrics {
            name: self.name.to_string(),
            row: RawMetricRow {
                apr: self.apr,
                ..Default::default()
            },
        })
    }
    fn name(&self) -> &str {
        self.name
    }
}

struct BrokenProvider;

#[async_trait]
impl MetricsProvider for BrokenProvider {
    async fn fetch_row(&self) -> Result<NetworkMetrics> {
        bail!("connection refused")
    }
    fn name(&self) -> &str {
        "BROKEN"
    }
}

#[tokio::test]
async fn failures_are_dropped_and_successes_kept_in_order() {
    let providers: Vec<Box<dyn MetricsProvider>> = vec![
        Box::new(SlowProvider {
            name: "OSMOSIS",
            delay_ms: 60,
            apr: 0.1,
        }),
        Box::new(BrokenProvider),
        Box::new(StaticTableProvider::new("akash", "apr,cutoff_token\n0.2,900")),
        Box::new(StaticTableProvider::new("kava", "only a header line")),
    ];

    let rows = run_once(&providers).await;
    let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
    // Slow OSMOSIS settles last but keeps its slot.
    assert_eq!(names, vec!["OSMOSIS", "AKASH"]);
    assert_eq!(rows[1].row.cutoff_token, 900.0);
}

#[tokio::test]
async fn fetches_run_concurrently() {
    let providers: Vec<Box<dyn MetricsProvider>> = (0..10)
        .map(|i| {
            Box::new(SlowProvider {
                name: "N",
                delay_ms: 200,
                apr: i as f64 / 100.0,
            }) as Box<dyn MetricsProvider>
        })
        .collect();

    let t0 = std::time::Instant::now();
    let rows = run_once(&providers).await;
    assert_eq!(rows.len(), 10);
    // Sequential would take ≥ 2s.
    assert!(t0.elapsed() < Duration::from_millis(1_500), "took {:?}", t0.elapsed());
}

#[tokio::test]
async fn all_failing_gives_empty_population() {
    let providers: Vec<Box<dyn MetricsProvider>> = vec![Box::new(BrokenProvider), Box::new(BrokenProvider)];
    assert!(run_once(&providers).await.is_empty());
}
