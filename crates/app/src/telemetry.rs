//! Tracing subscriber and metrics recorder set-up.

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use crate::config::{Config, LogFormat};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    Tracing(#[from] TryInitError),

    #[error("Failed to install metrics recorder: {0}")]
    Metrics(#[from] BuildError),
}

/// Installs the global tracing subscriber.
///
/// The filter comes from `config.log_level`. Fails if a global subscriber
/// is already set.
pub fn init_tracing(config: &Config) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init()?,
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?,
    }

    Ok(())
}

/// Installs the Prometheus recorder as the global metrics recorder.
///
/// The returned handle renders the text exposition format.
pub fn install_metrics_recorder() -> Result<PrometheusHandle, TelemetryError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    Ok(handle)
}

/// Installs tracing and, when `config.metrics_enabled` is set, the
/// Prometheus recorder.
///
/// Returns the recorder handle, or `None` when metrics are disabled.
pub fn init(config: &Config) -> Result<Option<PrometheusHandle>, TelemetryError> {
    init_tracing(config)?;

    if !config.metrics_enabled {
        tracing::info!("metrics recorder disabled");
        return Ok(None);
    }

    install_metrics_recorder().map(Some)
}
