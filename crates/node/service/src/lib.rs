//! Drives the derivation pipeline: prefetch an L1 block, detect operations,
//! build deposits, propose an L2 block, optionally validate. Owned
//! exclusively by the binary's import loop; the head cache and prefetcher
//! are not shared with any other component.

mod error;

use std::sync::Arc;

use alloy_primitives::B256;
use ethd_engine::{FillerPolicy, Proposer};
use ethd_genesis::NetworkConfig;
use ethd_protocol::{HeadCache, L1AttributesDeposit};
use ethd_sources::{PrefetchResult, Prefetcher};
use ethd_storage::BlockTag;
use ethd_validator::Validator;

pub use error::DriverError;

/// What one tick produced.
#[derive(Debug, Clone)]
pub enum TickOutcome {
    /// The L1 block was not yet mined; the caller should wait before retrying.
    NotReady,
    /// The L1 block was derived into one or more L2 blocks (fillers, then the
    /// real block), optionally cross-checked against the reference API.
    Produced {
        /// L2 block hashes produced, in order; the last is the real block.
        l2_block_hashes: Vec<B256>,
        /// The validation result, if `VALIDATE_IMPORT` is enabled.
        validation: Option<ethd_protocol::ValidationResult>,
    },
}

/// Ties the prefetcher, detector, builder, proposer, and validator into one
/// sequential per-L1-block tick.
#[derive(Debug)]
pub struct Driver {
    prefetcher: Prefetcher,
    proposer: Proposer,
    validator: Option<Validator>,
    config: Arc<NetworkConfig>,
    filler: FillerPolicy,
    head: HeadCache,
    head_timestamp: u64,
    next_l1_block: u64,
    next_l2_block: u64,
}

impl Driver {
    /// Builds a driver starting at `next_l1_block`, with the L2 head already
    /// at `head`/`head_timestamp`/`next_l2_block` (read from the L2 client
    /// at startup).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        prefetcher: Prefetcher,
        proposer: Proposer,
        validator: Option<Validator>,
        config: Arc<NetworkConfig>,
        head: HeadCache,
        head_timestamp: u64,
        next_l1_block: u64,
        next_l2_block: u64,
    ) -> Self {
        let filler = FillerPolicy::new(config.l2_block_time);
        Self {
            prefetcher,
            proposer,
            validator,
            config,
            filler,
            head,
            head_timestamp,
            next_l1_block,
            next_l2_block,
        }
    }

    /// The next L1 block number this driver will derive.
    pub const fn next_l1_block(&self) -> u64 {
        self.next_l1_block
    }

    /// The current L2 head cache.
    pub const fn head(&self) -> HeadCache {
        self.head
    }

    /// Runs one tick: derives `self.next_l1_block`, advancing the cursor on
    /// success. Returns [`TickOutcome::NotReady`] without advancing if the
    /// block has not been mined yet.
    pub async fn tick(&mut self) -> Result<TickOutcome, DriverError> {
        let l1_block_number = self.next_l1_block;
        self.prefetcher.ensure_prefetched(l1_block_number).await?;

        let bundle = match self.prefetcher.fetch(l1_block_number).await? {
            PrefetchResult::Ready(bundle) => bundle,
            PrefetchResult::NotReady => return Ok(TickOutcome::NotReady),
        };

        let target_timestamp = if bundle.l1_block.timestamp > self.head_timestamp {
            bundle.l1_block.timestamp
        } else {
            self.head_timestamp + self.config.l2_block_time
        };
        let filler_count = self.filler.filler_count(self.head_timestamp, target_timestamp);

        let attrs = L1AttributesDeposit {
            number: bundle.l1_block.number,
            timestamp: bundle.l1_block.timestamp,
            base_fee: bundle.l1_block.base_fee_per_gas,
            blob_base_fee: bundle.l1_block.blob_base_fee_per_gas,
            block_hash: bundle.l1_block.hash,
            batcher_hash: B256::ZERO,
            sequence_number: filler_count,
            base_fee_scalar: 1368,
            blob_base_fee_scalar: 810_949,
        };
        let deposits =
            ethd_builder::build_block(&attrs, &self.config.addresses, &bundle.operations, bundle.l1_block.hash);

        let l2_block_hashes = self
            .proposer
            .propose(&mut self.head, &mut self.head_timestamp, &bundle.l1_block, 0, deposits)
            .await?;

        let l2_block_numbers: Vec<u64> =
            (self.next_l2_block..self.next_l2_block + l2_block_hashes.len() as u64).collect();
        self.next_l2_block += l2_block_hashes.len() as u64;

        self.prefetcher.clear_older_than(l1_block_number.saturating_sub(1));

        let validation = match &self.validator {
            Some(validator) => {
                let storage_block =
                    BlockTag::Hash(*l2_block_hashes.last().expect("propose always produces one block"));
                let result = validator.validate(l1_block_number, &l2_block_numbers, storage_block).await;
                if !result.success && !result.api_unavailable {
                    return Err(DriverError::Validation { errors: result.errors.clone() });
                }
                Some(result)
            }
            None => None,
        };

        tracing::info!(
            l1_block_number,
            l2_blocks_produced = l2_block_hashes.len(),
            validated = validation.is_some(),
            "derived L1 block"
        );

        self.next_l1_block += 1;
        Ok(TickOutcome::Produced { l2_block_hashes, validation })
    }
}
