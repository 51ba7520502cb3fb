//! Error types for L1/L2 RPC access and the prefetcher.

use derive_more::Display;

/// Errors surfaced by the L1/L2 clients and the prefetcher.
#[derive(Debug, Display)]
pub enum SourceError {
    /// A JSON-RPC call failed after retry exhaustion.
    #[display("rpc error: {_0}")]
    Rpc(String),
    /// `fetch` did not resolve within its timeout.
    #[display("fetch timed out")]
    Timeout,
    /// The configured URL could not be parsed.
    #[display("invalid url: {_0}")]
    InvalidUrl(String),
}

impl std::error::Error for SourceError {}
