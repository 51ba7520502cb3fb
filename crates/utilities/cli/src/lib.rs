//! Shared CLI plumbing for the `ethd-node` binary: environment-variable-driven
//! configuration, logging setup, and the optional metrics exporter.

mod config;
mod logging;
mod metrics;

pub use config::Config;
pub use logging::{LogFormat, LoggingConfig};
pub use metrics::MetricsConfig;
