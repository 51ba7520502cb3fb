//! Read-only L1 client: block + receipt fetching and conversion into the
//! domain model consumed by the detector and builder.

use std::time::Duration;

use alloy_consensus::Transaction as _;
use alloy_eips::{BlockNumberOrTag, eip4844::calc_blob_gasprice};
use alloy_network_primitives::TransactionResponse as _;
use alloy_primitives::Bytes;
use alloy_provider::{Provider, ProviderBuilder, RootProvider};
use alloy_rpc_types_eth::{Block, TransactionReceipt};
use backon::{ExponentialBuilder, Retryable};
use ethd_protocol::{L1Block, L1Log, L1Transaction, TxStatus};
use url::Url;

use crate::SourceError;

/// A read-only JSON-RPC client against an L1 execution node.
#[derive(Debug, Clone)]
pub struct L1Client {
    provider: RootProvider,
}

impl L1Client {
    /// Builds a client against `url`.
    pub fn new(url: Url) -> Self {
        let provider = ProviderBuilder::new().connect_http(url);
        Self { provider }
    }

    fn backoff() -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(Duration::from_secs(1))
            .with_factor(2.0)
            .with_max_delay(Duration::from_secs(32))
            .with_max_times(7)
            .with_jitter()
    }

    /// The current L1 chain head number.
    pub async fn chain_tip(&self) -> Result<u64, SourceError> {
        (|| async { self.provider.get_block_number().await })
            .retry(Self::backoff())
            .await
            .map_err(|e| SourceError::Rpc(e.to_string()))
    }

    /// Fetches block `n` with full transactions plus its receipts, or `None`
    /// if the block has not been mined yet.
    pub async fn fetch_block(&self, n: u64) -> Result<Option<L1Block>, SourceError> {
        let block = (|| async {
            self.provider.get_block_by_number(BlockNumberOrTag::Number(n)).full().await
        })
        .retry(Self::backoff())
        .await
        .map_err(|e| SourceError::Rpc(e.to_string()))?;

        let Some(block) = block else { return Ok(None) };

        let receipts = (|| async { self.provider.get_block_receipts(n.into()).await })
            .retry(Self::backoff())
            .await
            .map_err(|e| SourceError::Rpc(e.to_string()))?
            .unwrap_or_default();

        Ok(Some(convert_block(block, receipts)))
    }
}

fn convert_block(block: Block, receipts: Vec<TransactionReceipt>) -> L1Block {
    let number = block.header.inner.number;
    let timestamp = block.header.inner.timestamp;
    let hash = block.header.hash;
    let parent_hash = block.header.inner.parent_hash;
    let mix_hash = block.header.inner.mix_hash;
    let base_fee_per_gas = block.header.inner.base_fee_per_gas.unwrap_or_default();
    let blob_base_fee_per_gas =
        block.header.inner.excess_blob_gas.map(calc_blob_gasprice).unwrap_or_default();

    let mut receipts_by_index = receipts;
    receipts_by_index.sort_by_key(|r| r.transaction_index);

    let transactions = block
        .transactions
        .into_transactions()
        .enumerate()
        .map(|(index, tx)| {
            let receipt = receipts_by_index.get(index);
            convert_transaction(tx, index as u64, receipt)
        })
        .collect();

    L1Block {
        number,
        timestamp,
        hash,
        parent_hash,
        mix_hash,
        base_fee_per_gas,
        blob_base_fee_per_gas,
        transactions,
    }
}

fn convert_transaction(
    tx: alloy_rpc_types_eth::Transaction,
    index: u64,
    receipt: Option<&TransactionReceipt>,
) -> L1Transaction {
    let hash = tx.tx_hash();
    let from = tx.from();
    let to = tx.to();
    let input = Bytes::from(tx.input().to_vec());

    let (status, logs) = match receipt {
        Some(receipt) => {
            let status = if receipt.status() { TxStatus::Success } else { TxStatus::Reverted };
            let logs = receipt
                .logs()
                .iter()
                .map(|log| L1Log {
                    address: log.inner.address,
                    topics: log.inner.data.topics().to_vec(),
                    data: log.inner.data.data.clone(),
                })
                .collect();
            (status, logs)
        }
        None => (TxStatus::Reverted, Vec::new()),
    };

    L1Transaction { hash, index, from, to, input, status, logs }
}
