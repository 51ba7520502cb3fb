//! `tracing-subscriber` setup shared by every `ethd-node` subcommand.

use clap::ValueEnum;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Selects the log line encoding. `Terse` is for an interactive terminal;
/// `Json` is for log aggregators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, single-line-per-event formatting.
    Terse,
    /// One JSON object per event.
    Json,
}

/// Logging configuration, recognized as both CLI flags and environment
/// variables.
#[derive(Debug, Clone, clap::Args)]
pub struct LoggingConfig {
    /// Log line encoding.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Terse)]
    pub log_format: LogFormat,

    /// `env-filter` directive, e.g. `info` or `ethd_node_service=debug,info`.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl LoggingConfig {
    /// Installs the global `tracing` subscriber. Must be called once, before
    /// any other `tracing` call.
    pub fn init(&self) {
        let filter = EnvFilter::try_new(&self.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
        let registry = tracing_subscriber::registry().with(filter);

        match self.log_format {
            LogFormat::Terse => registry.with(tracing_subscriber::fmt::layer()).init(),
            LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        }
    }
}
