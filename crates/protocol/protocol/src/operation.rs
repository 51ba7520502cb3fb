//! Classified protocol operations, the detector's output and the builder's input.

use alloc::string::String;

use alloy_primitives::{Address, B256};

/// Token-deploy/mint parameters embedded in a data-URI JSON payload.
///
/// Parsed opportunistically by the detector's create-from-input rule; a parse
/// failure never suppresses the enclosing create, it only leaves this `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenParams {
    /// The `p` field, identifying the token protocol (e.g. `"erc-20"`).
    pub protocol: String,
    /// The `op` field: `"deploy"` or `"mint"`.
    pub operation: String,
    /// The `tick` field.
    pub tick: String,
    /// The `max` field for deploys, or the packed `id` field for mints.
    pub max: Option<String>,
    /// The `lim` field.
    pub lim: Option<String>,
    /// The `amt` field for mints.
    pub amt: Option<String>,
}

/// A classified, protocol-relevant action extracted from one L1 transaction.
///
/// Operations are pure data: the detector that produces them performs no contract
/// reads and the builder that consumes them performs no further classification.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operation {
    /// A creation expressed as a data-URI transaction input.
    CreateFromInput {
        /// The originating L1 transaction hash.
        tx_hash: B256,
        /// The L1 transaction sender, the creator and the on-chain `from` for
        /// the deposit.
        from: Address,
        /// The initial owner: the L1 transaction's `to` address.
        initial_owner: Address,
        /// The raw data-URI content.
        content_uri: String,
        /// Whether the `rule=esip6` mediatype parameter was present.
        esip6: bool,
        /// Whether ESIP-7 compression negotiation was present.
        esip7_compressed: bool,
        /// Opportunistically parsed token-deploy/mint parameters.
        token_params: Option<TokenParams>,
    },
    /// A creation expressed as an ESIP-3 event.
    CreateFromEvent {
        /// The originating L1 transaction hash.
        tx_hash: B256,
        /// The contract that emitted the creation event.
        emitter_address: Address,
        /// The initial owner, decoded from the event's indexed topic.
        initial_owner: Address,
        /// The content URI, decoded from the event data.
        content_uri: String,
        /// Whether the `rule=esip6` mediatype parameter was present.
        esip6: bool,
        /// Whether ESIP-7 compression negotiation was present.
        esip7_compressed: bool,
    },
    /// An ESIP-1 style transfer, either input- or event-derived.
    Transfer {
        /// The transferring address.
        from: Address,
        /// The recipient.
        to: Address,
        /// The ethscription's identifying transaction hash.
        ethscription_tx_hash: B256,
    },
    /// An ESIP-2 transfer asserting an expected previous owner.
    TransferPrevOwner {
        /// The transferring address.
        from: Address,
        /// The recipient.
        to: Address,
        /// The ethscription's identifying transaction hash.
        ethscription_tx_hash: B256,
        /// The previous owner the caller expects to be displacing.
        expected_previous_owner: Address,
    },
    /// An ESIP-5 multi-transfer: one `to` recipient, several ethscriptions.
    MultiTransfer {
        /// The transferring address.
        from: Address,
        /// The recipient.
        to: Address,
        /// The ethscription-identifying transaction hashes, in input order.
        ethscription_tx_hashes: alloc::vec::Vec<B256>,
    },
}

impl Operation {
    /// True for the two creation variants.
    pub const fn is_create(&self) -> bool {
        matches!(self, Self::CreateFromInput { .. } | Self::CreateFromEvent { .. })
    }
}
