//! An Engine API client and block proposer driving the L2 execution client.

mod client;
mod jwt;
mod proposer;

pub use client::EngineClient;
pub use proposer::{FillerPolicy, Proposer, ProposerError};

use derive_more::Display;

/// Errors constructing or operating the Engine API client.
#[derive(Debug, Display)]
pub enum EngineError {
    /// `JWT_SECRET` was not 32 bytes of hex.
    #[display("invalid JWT secret: expected 64 hex characters")]
    InvalidJwtSecret,
    /// The RPC transport could not be built, e.g. a malformed URL.
    #[display("failed to build engine transport: {_0}")]
    Transport(String),
    /// An Engine API call failed after exhausting its retry budget.
    #[display("engine call failed: {_0}")]
    Rpc(String),
    /// The execution client returned `INVALID` for a forkchoice update or new payload.
    #[display("execution client rejected payload: {_0}")]
    Invalid(String),
}

impl std::error::Error for EngineError {}
