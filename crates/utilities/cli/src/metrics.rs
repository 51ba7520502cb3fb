//! Optional Prometheus exporter, compiled in behind the `metrics` feature.

use std::net::SocketAddr;

/// Metrics exporter configuration, recognized as both CLI flags and
/// environment variables.
#[derive(Debug, Clone, clap::Args)]
pub struct MetricsConfig {
    /// Starts the Prometheus exporter.
    #[arg(long, env = "METRICS_ENABLED", default_value_t = false)]
    pub metrics_enabled: bool,

    /// Address the Prometheus exporter listens on.
    #[arg(long, env = "METRICS_LISTEN_ADDR", default_value = "127.0.0.1:9000")]
    pub metrics_listen_addr: SocketAddr,
}

#[cfg(feature = "metrics")]
impl MetricsConfig {
    /// Installs the Prometheus recorder and starts serving `/metrics` if
    /// enabled. A no-op if `metrics_enabled` is false.
    pub fn init(&self) -> Result<(), metrics_exporter_prometheus::BuildError> {
        if !self.metrics_enabled {
            return Ok(());
        }
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(self.metrics_listen_addr)
            .install()?;
        metrics_process::Collector::default().describe();
        Ok(())
    }
}
