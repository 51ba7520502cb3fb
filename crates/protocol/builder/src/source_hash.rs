//! Deposit source-hash derivation.
//!
//! `source_hash = keccak256(domain ++ keccak256(l1_block_hash ++ index))`, the
//! same two-level hash Optimism uses to derive deposit source hashes from an L1
//! block hash and a log or transaction index, keyed by a one-byte-wide domain
//! so user deposits and the L1-attributes deposit never collide.

use alloy_primitives::{B256, keccak256};
use ethd_protocol::{L1_INFO_DEPOSIT_SOURCE_DOMAIN, USER_DEPOSIT_SOURCE_DOMAIN};

fn derive(domain: u64, l1_block_hash: B256, index: u64) -> B256 {
    let mut inner = [0u8; 64];
    inner[..32].copy_from_slice(l1_block_hash.as_slice());
    inner[56..64].copy_from_slice(&index.to_be_bytes());
    let inner_hash = keccak256(inner);

    let mut outer = [0u8; 64];
    outer[24..32].copy_from_slice(&domain.to_be_bytes());
    outer[32..64].copy_from_slice(inner_hash.as_slice());
    keccak256(outer)
}

/// Source hash for an operation-derived deposit, keyed by the originating L1
/// transaction's log or transaction index.
pub fn user_deposit(l1_block_hash: B256, index: u64) -> B256 {
    derive(USER_DEPOSIT_SOURCE_DOMAIN, l1_block_hash, index)
}

/// Source hash for the per-block L1-attributes system deposit.
pub fn l1_info_deposit(l1_block_hash: B256, sequence_number: u64) -> B256 {
    derive(L1_INFO_DEPOSIT_SOURCE_DOMAIN, l1_block_hash, sequence_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_and_l1_info_domains_never_collide() {
        let hash = B256::repeat_byte(0x42);
        assert_ne!(user_deposit(hash, 0), l1_info_deposit(hash, 0));
    }

    #[test]
    fn is_deterministic() {
        let hash = B256::repeat_byte(0x11);
        assert_eq!(user_deposit(hash, 3), user_deposit(hash, 3));
    }

    #[test]
    fn index_changes_the_hash() {
        let hash = B256::repeat_byte(0x11);
        assert_ne!(user_deposit(hash, 0), user_deposit(hash, 1));
    }
}
