//! L2 block and head-cursor types.

use alloc::vec::Vec;

use alloy_primitives::B256;

use crate::DepositTransaction;

/// A produced L2 block: always one L1-attributes deposit followed by zero or more
/// operation-derived deposits, in detector order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct L2Block {
    /// L2 block number.
    pub number: u64,
    /// L2 block timestamp; strictly monotone across consecutive blocks.
    pub timestamp: u64,
    /// The block hash, available once the Engine API has accepted the payload.
    pub hash: B256,
    /// The parent block hash.
    pub parent_hash: B256,
    /// Deposit transactions in block order; index 0 is always the L1-attributes tx.
    pub deposits: Vec<DepositTransaction>,
}

/// The three Engine API head cursors the proposer mirrors after every accepted
/// payload.
///
/// Owned exclusively by the driver loop; no other component writes it, so no lock
/// is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeadCache {
    /// The most recently produced, not-yet-finalized L2 block hash.
    pub unsafe_head: B256,
    /// The safe L2 block hash.
    pub safe_head: B256,
    /// The finalized L2 block hash.
    pub finalized_head: B256,
}

impl HeadCache {
    /// Builds a head cache with every cursor pointing at the same block, the state
    /// immediately after loading the L2 client's current head at startup.
    pub const fn at(hash: B256) -> Self {
        Self { unsafe_head: hash, safe_head: hash, finalized_head: hash }
    }
}
