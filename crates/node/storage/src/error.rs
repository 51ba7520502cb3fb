//! Error type for the storage reader.

use derive_more::Display;

/// Errors reading Ethscriptions contract storage.
#[derive(Debug, Display)]
pub enum StorageError {
    /// The underlying RPC call failed for a reason other than a contract
    /// revert (transport error, timeout, malformed response).
    #[display("rpc error: {_0}")]
    Rpc(String),
    /// The contract returned data that does not decode as the expected
    /// return type.
    #[display("malformed return data: {_0}")]
    Decode(String),
}

impl std::error::Error for StorageError {}

impl From<ethd_sources::SourceError> for StorageError {
    fn from(value: ethd_sources::SourceError) -> Self {
        Self::Rpc(value.to_string())
    }
}
