//! Rank networks from a local directory of `<slug>.csv` metric tables.
//!
//! Usage: rank_offline <dir> [capital] [revenue] [stability] [market_barriers]

use anyhow::{Context, Result};
use validscope::analyze;
use validscope::config::AppConfig;
use validscope::ingest::{self, providers::StaticTableProvider, types::MetricsProvider};
use validscope::store::Population;
use validscope::SearchParameters;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_target(false).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let dir = args.first().context("missing <dir> argument")?;
    let arg = |i: usize| args.get(i).map(String::as_str).unwrap_or("");
    let params = SearchParameters::from_text(arg(1), arg(2), arg(3), arg(4));

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("reading {dir}"))? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some("csv") {
            paths.push(path);
        }
    }
    // Directory order is unspecified; sort so ties rank reproducibly.
    paths.sort();

    let mut providers: Vec<Box<dyn MetricsProvider>> = Vec::new();
    for path in paths {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        let body = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        providers.push(Box::new(StaticTableProvider::new(stem, &body)));
    }

    let population = Population::new(ingest::run_once(&providers).await);
    // Same constants the server would use.
    let scoring = AppConfig::from_env().scoring().current();
    let ranked = analyze::ranking(&population, Some(&params), &scoring);

    println!(
        "capital={} weights={}/{}/{}",
        params.capital, params.weights.revenue, params.weights.stability, params.weights.market_barriers
    );
    for (i, n) in ranked.iter().enumerate() {
        println!(
            "{:>2}. {:<16} total {:>6.2}  barriers {:>6.2}  governance {:>6.2}  profit {:>6.2}",
            i + 1,
            n.name,
            n.total(),
            n.scores.market_barriers,
            n.scores.network_governance,
            n.scores.profitability
        );
    }
    Ok(())
}
