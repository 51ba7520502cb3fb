//! Block reference accepted by the storage reader's read calls.

use alloy_eips::{BlockId, BlockNumberOrTag};
use alloy_primitives::B256;

/// A block reference for an `eth_call`/`eth_getStorageAt`: `"latest"`, a
/// block number, or an EIP-1898 block-hash object. The hash form is required
/// for reorg-safe validator reads, since a number alone can be re-pointed by
/// a reorg between the read and the caller's interpretation of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    /// The current chain head.
    Latest,
    /// A specific block number.
    Number(u64),
    /// A specific block hash (EIP-1898).
    Hash(B256),
}

impl From<BlockTag> for BlockId {
    fn from(tag: BlockTag) -> Self {
        match tag {
            BlockTag::Latest => Self::Number(BlockNumberOrTag::Latest),
            BlockTag::Number(n) => Self::Number(BlockNumberOrTag::Number(n)),
            BlockTag::Hash(hash) => Self::from(hash),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_converts_to_the_latest_tag() {
        assert_eq!(BlockId::from(BlockTag::Latest), BlockId::Number(BlockNumberOrTag::Latest));
    }

    #[test]
    fn number_converts_to_a_numbered_block_id() {
        assert_eq!(BlockId::from(BlockTag::Number(42)), BlockId::Number(BlockNumberOrTag::Number(42)));
    }

    #[test]
    fn hash_converts_to_an_eip1898_block_id() {
        let hash = B256::repeat_byte(7);
        assert_eq!(BlockId::from(BlockTag::Hash(hash)), BlockId::from(hash));
    }
}
