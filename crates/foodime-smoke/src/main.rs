//! Foodime Smoke - run the service checks against a live instance

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use foodime_smoke::{checks, ServiceClient, SmokeConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "foodime_smoke=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SmokeConfig::from_env();
    info!("Checking Foodime AI service at {}", config.base_url);

    let client = ServiceClient::new(&config)?;
    let reports = checks::run_all(&client, &config).await;

    let failed = reports.iter().filter(|r| !r.passed()).count();
    if failed > 0 {
        anyhow::bail!("{} of {} checks failed", failed, reports.len());
    }

    info!("All {} checks passed", reports.len());
    Ok(())
}
