//! Logging and metrics setup for binaries embedding the factory.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::EnvFilter;

/// Prometheus handle for on-demand scrape output.
pub type PrometheusHandle = metrics_exporter_prometheus::PrometheusHandle;

/// Error type returned when a global subscriber is already installed.
pub type TracingInitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    /// `json` (any case) selects JSON; anything else is human-readable.
    #[must_use]
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Install the global `tracing` subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to `default_filter`.
///
/// # Errors
/// Returns an error if a global subscriber is already set.
pub fn init_tracing(default_filter: &str, format: LogFormat) -> Result<(), TracingInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    }
}

/// Install the global metrics recorder and return a handle for rendering.
///
/// Uses `PrometheusBuilder` without an HTTP listener.
///
/// # Errors
/// Returns an error if a recorder is already installed or building fails.
pub fn init_metrics() -> Result<PrometheusHandle, metrics_exporter_prometheus::BuildError> {
    let handle = PrometheusBuilder::new()
        .with_recommended_naming(true)
        .install_recorder()?;
    Ok(handle)
}

/// Convenience to wrap the handle in Arc for shared use.
#[must_use]
pub fn init_metrics_handle() -> Option<Arc<PrometheusHandle>> {
    init_metrics().ok().map(Arc::new)
}
