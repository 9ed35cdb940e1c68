//! Validscope: binary entrypoint
//! Loads the network metrics once, then serves rankings, network reports and
//! selection state over HTTP.

use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use validscope::{config::AppConfig, metrics::Metrics};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("validscope=info,warn"));

    // Shuttle may already have installed a subscriber; keep theirs then.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let metrics = match Metrics::init() {
        Ok(m) => Some(m),
        Err(e) => {
            tracing::warn!(error = ?e, "metrics exporter disabled");
            None
        }
    };

    let cfg = AppConfig::from_env();
    let state = validscope::bootstrap(&cfg).await?;

    let mut router = validscope::router(state);
    if let Some(m) = metrics {
        router = router.merge(m.router());
    }

    Ok(router.into())
}
