//! Drives one L2 block (or a run of filler blocks followed by one real block)
//! through the Engine API per L1 block.

use alloy_primitives::{Address, B256};
use alloy_rpc_types_engine::{ForkchoiceState, PayloadAttributes};
use derive_more::Display;
use ethd_genesis::{NetworkConfig, SystemAddresses};
use ethd_protocol::{DepositTransaction, HeadCache, L1AttributesDeposit, L1Block};
use op_alloy_rpc_types_engine::OpPayloadAttributes;

use crate::{EngineClient, EngineError};

/// Errors proposing a block.
#[derive(Debug, Display)]
pub enum ProposerError {
    /// The forkchoice update accepted the attributes but returned no payload id.
    #[display("forkchoiceUpdatedV3 returned no payload id")]
    MissingPayloadId,
    /// An underlying Engine API call failed.
    #[display("{_0}")]
    Engine(EngineError),
}

impl From<EngineError> for ProposerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl std::error::Error for ProposerError {}

/// Computes how many filler blocks must precede the real block so L2
/// timestamps stay within one block interval of the driving L1 timestamp.
#[derive(Debug, Clone, Copy)]
pub struct FillerPolicy {
    l2_block_time: u64,
}

impl FillerPolicy {
    /// Builds a policy for the given L2 block time, in seconds.
    pub const fn new(l2_block_time: u64) -> Self {
        Self { l2_block_time }
    }

    /// The number of filler blocks needed before a real block timestamped at
    /// `target_timestamp`, given the L2 head is currently at `head_timestamp`.
    pub const fn filler_count(&self, head_timestamp: u64, target_timestamp: u64) -> u64 {
        if target_timestamp <= head_timestamp {
            return 0;
        }
        let gap = target_timestamp - head_timestamp;
        (gap - 1) / self.l2_block_time
    }
}

/// Drives L2 block production through the Engine API.
#[derive(Debug, Clone)]
pub struct Proposer {
    engine: EngineClient,
    addresses: SystemAddresses,
    l2_block_time: u64,
    l2_block_gas_limit: u64,
    filler: FillerPolicy,
}

impl Proposer {
    /// Builds a proposer for `network`, driving `engine`.
    pub fn new(engine: EngineClient, network: &NetworkConfig) -> Self {
        Self {
            engine,
            addresses: network.addresses,
            l2_block_time: network.l2_block_time,
            l2_block_gas_limit: network.l2_block_gas_limit,
            filler: FillerPolicy::new(network.l2_block_time),
        }
    }

    /// Commits filler blocks (if the gap since `head_timestamp` exceeds one L2
    /// block interval) followed by one real block carrying `deposits`.
    /// Returns the hash of every block produced, in order; the last entry is
    /// the real block.
    pub async fn propose(
        &self,
        head: &mut HeadCache,
        head_timestamp: &mut u64,
        l1_block: &L1Block,
        sequence_base: u64,
        deposits: Vec<DepositTransaction>,
    ) -> Result<Vec<B256>, ProposerError> {
        let target_timestamp = if l1_block.timestamp > *head_timestamp {
            l1_block.timestamp
        } else {
            *head_timestamp + self.l2_block_time
        };

        let filler_count = self.filler.filler_count(*head_timestamp, target_timestamp);
        let mut produced = Vec::with_capacity(filler_count as usize + 1);

        for i in 0..filler_count {
            let filler_timestamp = *head_timestamp + self.l2_block_time;
            let filler_deposits = vec![self.l1_attributes_deposit(l1_block, sequence_base + i)];
            let hash = self.commit(head, filler_timestamp, l1_block, filler_deposits).await?;
            *head_timestamp = filler_timestamp;
            produced.push(hash);
        }

        let hash = self.commit(head, target_timestamp, l1_block, deposits).await?;
        *head_timestamp = target_timestamp;
        produced.push(hash);

        Ok(produced)
    }

    fn l1_attributes_deposit(&self, l1_block: &L1Block, sequence_number: u64) -> DepositTransaction {
        let attrs = L1AttributesDeposit {
            number: l1_block.number,
            timestamp: l1_block.timestamp,
            base_fee: l1_block.base_fee_per_gas,
            blob_base_fee: l1_block.blob_base_fee_per_gas,
            block_hash: l1_block.hash,
            batcher_hash: B256::ZERO,
            sequence_number,
            base_fee_scalar: 1368,
            blob_base_fee_scalar: 810_949,
        };
        ethd_builder::build_l1_attributes(&attrs, &self.addresses)
    }

    async fn commit(
        &self,
        head: &mut HeadCache,
        timestamp: u64,
        l1_block: &L1Block,
        deposits: Vec<DepositTransaction>,
    ) -> Result<B256, ProposerError> {
        let transactions = deposits.iter().map(DepositTransaction::encoded).collect::<Vec<_>>();

        let attributes = OpPayloadAttributes {
            payload_attributes: PayloadAttributes {
                timestamp,
                prev_randao: l1_block.mix_hash,
                suggested_fee_recipient: Address::ZERO,
                withdrawals: Some(Vec::new()),
                parent_beacon_block_root: Some(B256::ZERO),
            },
            transactions: Some(transactions),
            no_tx_pool: Some(true),
            gas_limit: Some(self.l2_block_gas_limit),
            eip_1559_params: None,
        };

        let state = ForkchoiceState {
            head_block_hash: head.unsafe_head,
            safe_block_hash: head.safe_head,
            finalized_block_hash: head.finalized_head,
        };

        let updated = self.engine.fork_choice_updated_v3(state, Some(attributes)).await?;
        let payload_id = updated.payload_id.ok_or(ProposerError::MissingPayloadId)?;

        let payload = self.engine.get_payload_v3(payload_id).await?;
        let new_block_hash = payload.payload_inner.payload_inner.block_hash;

        self.engine.new_payload_v3(payload, Vec::new(), B256::ZERO).await?;

        head.unsafe_head = new_block_hash;
        head.safe_head = new_block_hash;
        head.finalized_head = new_block_hash;

        let confirm = ForkchoiceState {
            head_block_hash: head.unsafe_head,
            safe_block_hash: head.safe_head,
            finalized_block_hash: head.finalized_head,
        };
        self.engine.fork_choice_updated_v3(confirm, None).await?;

        Ok(new_block_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_fillers_needed_within_one_block_interval() {
        let policy = FillerPolicy::new(12);
        assert_eq!(policy.filler_count(100, 112), 0);
    }

    #[test]
    fn fillers_needed_for_a_large_gap() {
        let policy = FillerPolicy::new(12);
        assert_eq!(policy.filler_count(100, 148), 3);
    }

    #[test]
    fn no_fillers_when_target_does_not_advance() {
        let policy = FillerPolicy::new(12);
        assert_eq!(policy.filler_count(100, 100), 0);
    }
}
