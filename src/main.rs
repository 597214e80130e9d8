//! Resolves the configured database client and checks that it is reachable.

use anyhow::{Context, Result};
use tracing::{error, info};

use db_client_factory::app::{ClientFactory, ClientSettings};
use db_client_factory::domain::DatabaseClient;
use db_client_factory::infra::observability::{LogFormat, init_metrics_handle, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    let settings = ClientSettings::load();

    let format = LogFormat::from_env_value(std::env::var("LOG_FORMAT").ok().as_deref());
    init_tracing("info", format)
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to initialize tracing")?;
    let metrics = init_metrics_handle();

    let client = match ClientFactory::default().get_client(&settings) {
        Ok(client) => client,
        Err(e) if e.is_config() => {
            return Err(e).context("database client is not configured; check the .env file");
        }
        Err(e) => return Err(e).context("failed to resolve database client"),
    };
    info!(mode = %client.mode(), "Database client ready");

    if let Err(e) = client.health_check().await {
        error!(error = %e, "Database health check failed");
        return Err(e.into());
    }
    info!("Database health check passed");

    if let Some(handle) = metrics {
        tracing::debug!(metrics = %handle.render(), "Metrics snapshot");
    }

    Ok(())
}
