//! Small alloy-adjacent utilities shared by the node crates. Currently: an
//! LRU cache of recently-seen L1 block hashes, used to flag a reorg the
//! prefetcher's sliding window would otherwise silently paper over by simply
//! re-fetching the new canonical block at the same number.

use std::num::NonZeroUsize;

use alloy_primitives::B256;
use lru::LruCache;

const DEFAULT_CAPACITY: usize = 256;

/// Tracks `(number -> hash)` for the most recently derived L1 blocks and
/// flags when a newly fetched block's parent hash does not match the cached
/// hash at `number - 1`.
#[derive(Debug)]
pub struct BlockHashCache {
    hashes: LruCache<u64, B256>,
}

impl Default for BlockHashCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl BlockHashCache {
    /// Builds a cache holding up to `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(DEFAULT_CAPACITY).expect("nonzero"));
        Self { hashes: LruCache::new(capacity) }
    }

    /// Records that L1 block `number` has hash `hash`, returning whether this
    /// contradicts a previously recorded hash for the same number (a reorg
    /// the cache itself observed).
    pub fn observe(&mut self, number: u64, hash: B256) -> bool {
        let reorged = self.hashes.get(&number).is_some_and(|&cached| cached != hash);
        self.hashes.put(number, hash);
        reorged
    }

    /// Checks `parent_hash` against the cached hash for `number - 1`, if any.
    /// Returns `false` (no contradiction) when nothing is cached for that
    /// number yet.
    pub fn parent_matches(&mut self, number: u64, parent_hash: B256) -> bool {
        number
            .checked_sub(1)
            .and_then(|parent_number| self.hashes.get(&parent_number))
            .is_none_or(|&cached| cached == parent_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observe_flags_a_changed_hash_at_the_same_number() {
        let mut cache = BlockHashCache::new(8);
        assert!(!cache.observe(10, B256::repeat_byte(1)));
        assert!(cache.observe(10, B256::repeat_byte(2)));
    }

    #[test]
    fn parent_matches_is_permissive_when_nothing_is_cached() {
        let mut cache = BlockHashCache::new(8);
        assert!(cache.parent_matches(10, B256::repeat_byte(1)));
    }

    #[test]
    fn parent_matches_detects_a_discontinuity() {
        let mut cache = BlockHashCache::new(8);
        cache.observe(9, B256::repeat_byte(1));
        assert!(!cache.parent_matches(10, B256::repeat_byte(9)));
        assert!(cache.parent_matches(10, B256::repeat_byte(1)));
    }
}
