//! Deposit transaction types: the wire format the builder emits and the proposer
//! feeds to the Engine API.

use alloy_primitives::{Address, B256, Bytes, U256};
use alloy_rlp::RlpEncodable;

/// The Optimism-style deposit transaction type byte.
pub const DEPOSIT_TX_TYPE: u8 = 0x7d;

/// Domain prefix for operation-derived deposits.
pub const USER_DEPOSIT_SOURCE_DOMAIN: u64 = 0;

/// Domain prefix for the L1-attributes system deposit.
pub const L1_INFO_DEPOSIT_SOURCE_DOMAIN: u64 = 1;

/// A single Optimism-style deposit transaction (type `0x7d`).
///
/// RLP-encoded with the type byte prepended, per [EIP-2718] typed-transaction
/// envelopes.
///
/// [EIP-2718]: https://eips.ethereum.org/EIPS/eip-2718
#[derive(Debug, Clone, PartialEq, Eq, RlpEncodable)]
#[rlp(trailing)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepositTransaction {
    /// Deterministic 32-byte identifier derived from the L1 block hash and index.
    pub source_hash: B256,
    /// The spoofed sender: the L1 originator for input-style operations, or the
    /// emitting contract address for event-derived operations.
    pub from: Address,
    /// The recipient: the Ethscriptions contract predeploy, or `None` for a
    /// contract-creation deposit (unused by this pipeline).
    pub to: Option<Address>,
    /// Value minted on L2 before execution. Always zero for this pipeline.
    pub mint: U256,
    /// Value transferred by the call. Always zero for this pipeline.
    pub value: U256,
    /// Gas limit for the deposited call.
    pub gas: u64,
    /// Whether this deposit is exempt from the L2 gas limit. Always false.
    pub is_system_tx: bool,
    /// ABI-encoded calldata.
    pub data: Bytes,
}

impl DepositTransaction {
    /// RLP-encodes this transaction with the type-`0x7d` prefix, producing the
    /// bytes the Engine API expects in a payload's `transactions` list.
    pub fn encoded(&self) -> Bytes {
        let mut out = alloc::vec![DEPOSIT_TX_TYPE];
        alloy_rlp::Encodable::encode(self, &mut out);
        Bytes::from(out)
    }
}

/// The system deposit carrying L1 block metadata into every L2 block.
///
/// Always the first transaction in a produced L2 block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct L1AttributesDeposit {
    /// The L1 block number.
    pub number: u64,
    /// The L1 block timestamp.
    pub timestamp: u64,
    /// The L1 base fee.
    pub base_fee: U256,
    /// The L1 blob base fee.
    pub blob_base_fee: U256,
    /// The L1 block hash.
    pub block_hash: B256,
    /// The batcher address, packed into the predeploy's `batcherHash` slot.
    pub batcher_hash: B256,
    /// The sequence number of this L2 block within its epoch.
    pub sequence_number: u64,
    /// The base fee scalar.
    pub base_fee_scalar: u32,
    /// The blob base fee scalar.
    pub blob_base_fee_scalar: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_deposit_is_prefixed_with_the_type_byte() {
        let deposit = DepositTransaction {
            source_hash: B256::ZERO,
            from: Address::ZERO,
            to: Some(Address::ZERO),
            mint: U256::ZERO,
            value: U256::ZERO,
            gas: 1_000_000,
            is_system_tx: false,
            data: Bytes::new(),
        };
        let encoded = deposit.encoded();
        assert_eq!(encoded[0], DEPOSIT_TX_TYPE);
        assert!(encoded.len() > 1);
    }
}
