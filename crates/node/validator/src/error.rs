//! Internal error type for reference-API access. A failure here never
//! propagates to the caller as an error; it becomes
//! [`ethd_protocol::ValidationResult::api_unavailable`].

use derive_more::Display;

/// Errors reaching or parsing the reference Ethscriptions API.
#[derive(Debug, Display)]
pub enum ReferenceApiError {
    /// The HTTP request itself failed (network, timeout, non-2xx status).
    #[display("reference api request failed: {_0}")]
    Request(String),
    /// The response body did not parse as the expected JSON shape.
    #[display("reference api returned malformed json: {_0}")]
    Decode(String),
}

impl std::error::Error for ReferenceApiError {}
