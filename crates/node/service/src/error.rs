//! Error type for one driver tick.

use derive_more::Display;

/// Errors surfaced by a single driver tick. A tick finding the next L1 block
/// not yet mined is not an error; see [`crate::TickOutcome::NotReady`]. Any
/// variant here fails the tick outright; the caller retries on the next
/// scheduled interval.
#[derive(Debug, Display)]
pub enum DriverError {
    /// The L1 RPC client, the prefetcher, or the reference API failed.
    #[display("source error: {_0}")]
    Source(String),
    /// The proposer's Engine API calls failed or were rejected.
    #[display("proposer error: {_0}")]
    Proposer(String),
    /// Validation ran and found a divergence; the driver treats this as
    /// fatal for the tick.
    #[display("validation failed: {errors:?}")]
    Validation {
        /// The reconciliation errors surfaced by the validator.
        errors: Vec<String>,
    },
}

impl std::error::Error for DriverError {}

impl From<ethd_sources::SourceError> for DriverError {
    fn from(value: ethd_sources::SourceError) -> Self {
        Self::Source(value.to_string())
    }
}

impl From<ethd_engine::ProposerError> for DriverError {
    fn from(value: ethd_engine::ProposerError) -> Self {
        Self::Proposer(value.to_string())
    }
}
