//! Validator input/output types: the reconciliation the driver runs after
//! proposing a block, comparing reference-API expectations against on-chain
//! observations.

use alloc::{string::String, vec::Vec};

use alloy_primitives::{Address, B256};

/// One creation the reference API expects to have happened for an L1 block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpectedCreation {
    /// The originating L1 transaction hash.
    pub tx_hash: B256,
    /// The creator address.
    pub creator: Address,
    /// The initial owner.
    pub initial_owner: Address,
    /// The raw content URI, as served by the reference API.
    pub content_uri: String,
    /// SHA-256 of the decoded content bytes.
    pub content_sha: B256,
    /// The full mediatype string, e.g. `"image/png;base64"`.
    pub mimetype: String,
    /// The media type component, e.g. `"image"`.
    pub media_type: String,
    /// The mime subtype component, e.g. `"png"`.
    pub mime_subtype: String,
    /// Whether `rule=esip6` was present.
    pub esip6: bool,
}

/// One transfer the reference API expects to have happened for an L1 block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpectedTransfer {
    /// The ethscription's sequential token id, as assigned by the reference API.
    pub token_id: u64,
    /// The transferring address.
    pub from: Address,
    /// The recipient.
    pub to: Address,
}

/// The reference API's expectation for one L1 block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpectedBlockData {
    /// The L1 block number this expectation covers.
    pub l1_block_number: u64,
    /// Expected creations.
    pub creations: Vec<ExpectedCreation>,
    /// Expected transfers.
    pub transfers: Vec<ExpectedTransfer>,
}

/// The on-chain events the event decoder observed across every L2 block produced
/// for one L1 block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObservedBlockData {
    /// Observed creation tx hashes, lower-cased.
    pub creation_tx_hashes: Vec<String>,
    /// Observed transfers, as `(token_id, from, to)` triples.
    pub transfers: Vec<(u64, Address, Address)>,
}

/// The outcome of reconciling expected vs. observed state for one L1 block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationResult {
    /// The L1 block number this result covers.
    pub l1_block_number: u64,
    /// True if no divergence was found.
    pub success: bool,
    /// True if the reference API could not be reached; `success` is meaningless in
    /// that case and the driver must treat the result as inconclusive, not fatal.
    pub api_unavailable: bool,
    /// Human-readable divergence descriptions, empty when `success` is true.
    pub errors: Vec<String>,
    /// Counts surfaced in the per-tick log line.
    pub stats: ValidationStats,
}

/// Counts surfaced alongside a [`ValidationResult`] for structured logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationStats {
    /// Number of creations the reference API expected.
    pub expected_creations: u64,
    /// Number of creations observed on L2.
    pub observed_creations: u64,
    /// Number of transfers the reference API expected.
    pub expected_transfers: u64,
    /// Number of transfers observed on L2.
    pub observed_transfers: u64,
    /// Number of per-creation storage checks performed.
    pub storage_checks: u64,
}

impl ValidationResult {
    /// Builds a successful result with no errors.
    pub fn success(l1_block_number: u64, stats: ValidationStats) -> Self {
        Self { l1_block_number, success: true, api_unavailable: false, errors: Vec::new(), stats }
    }

    /// Builds a failed result carrying `errors`.
    pub fn failure(l1_block_number: u64, errors: Vec<String>, stats: ValidationStats) -> Self {
        Self { l1_block_number, success: false, api_unavailable: false, errors, stats }
    }

    /// Builds an inconclusive result: the reference API was unreachable.
    pub const fn api_unavailable(l1_block_number: u64) -> Self {
        Self {
            l1_block_number,
            success: false,
            api_unavailable: true,
            errors: Vec::new(),
            stats: ValidationStats {
                expected_creations: 0,
                observed_creations: 0,
                expected_transfers: 0,
                observed_transfers: 0,
                storage_checks: 0,
            },
        }
    }
}
