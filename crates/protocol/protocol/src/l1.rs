//! L1 block and transaction types as seen by the detector.

use alloc::{string::String, vec::Vec};

use alloy_primitives::{Address, B256, Bytes, U256};

/// A minimal, decoder-facing view of a receipt log: the fields the detector and
/// event decoder need, independent of any particular RPC client's wire type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct L1Log {
    /// The emitting contract address.
    pub address: Address,
    /// Indexed and non-indexed topic hashes; `topics[0]` is the event signature.
    pub topics: Vec<B256>,
    /// Non-indexed event data.
    pub data: Bytes,
}

/// The outcome of an L1 transaction, taken from its receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TxStatus {
    /// The transaction executed without reverting.
    Success,
    /// The transaction reverted.
    Reverted,
}

/// An L1 transaction, with the receipt data the detector needs.
///
/// `utf8_input` and `input_no_prefix` are computed once at construction so the
/// detector's rules never re-derive them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct L1Transaction {
    /// The transaction hash.
    pub hash: B256,
    /// Index of this transaction within its block.
    pub index: u64,
    /// The sender.
    pub from: Address,
    /// The recipient, `None` for contract-creation transactions.
    pub to: Option<Address>,
    /// Raw calldata.
    pub input: Bytes,
    /// Receipt status.
    pub status: TxStatus,
    /// Receipt logs, in emission order.
    pub logs: Vec<L1Log>,
}

impl L1Transaction {
    /// Best-effort UTF-8 decoding of `input`. Invalid byte sequences yield `None`,
    /// not a lossy replacement — the detector must not guess content it cannot decode.
    pub fn utf8_input(&self) -> Option<&str> {
        core::str::from_utf8(&self.input).ok()
    }

    /// `input` as lowercase hex without the `0x` prefix.
    pub fn input_no_prefix(&self) -> String {
        alloy_primitives::hex::encode(&self.input)
    }
}

/// An L1 block together with its transactions, in block order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct L1Block {
    /// Block number.
    pub number: u64,
    /// Block timestamp, seconds since the epoch.
    pub timestamp: u64,
    /// Block hash.
    pub hash: B256,
    /// Parent block hash.
    pub parent_hash: B256,
    /// `prevRandao`/mix hash, forwarded as the L2 payload's `prevRandao`.
    pub mix_hash: B256,
    /// Base fee per gas.
    pub base_fee_per_gas: U256,
    /// Blob base fee per gas, zero before the blob fee market activates.
    pub blob_base_fee_per_gas: U256,
    /// Transactions, in block order.
    pub transactions: Vec<L1Transaction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(input: &[u8]) -> L1Transaction {
        L1Transaction {
            hash: B256::ZERO,
            index: 0,
            from: Address::ZERO,
            to: Some(Address::ZERO),
            input: Bytes::copy_from_slice(input),
            status: TxStatus::Success,
            logs: Vec::new(),
        }
    }

    #[test]
    fn decodes_valid_utf8_input() {
        let t = tx(b"data:,hello");
        assert_eq!(t.utf8_input(), Some("data:,hello"));
    }

    #[test]
    fn rejects_invalid_utf8_input() {
        let t = tx(&[0xff, 0xfe, 0xfd]);
        assert_eq!(t.utf8_input(), None);
    }

    #[test]
    fn input_no_prefix_has_no_0x() {
        let t = tx(&[0xab, 0xcd]);
        assert_eq!(t.input_no_prefix(), "abcd");
    }
}
