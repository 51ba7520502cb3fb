//! Non-authenticated L2 read client: `eth_call`, block/receipt lookups and
//! storage reads used by the storage reader, event decoder, and the
//! derivation loop's startup head discovery.

use std::time::Duration;

use alloy_eips::BlockId;
use alloy_primitives::{Address, B256, Bytes, U256};
use alloy_provider::{Provider, ProviderBuilder, RootProvider};
use alloy_rpc_types_eth::{TransactionReceipt, TransactionRequest};
use backon::{ExponentialBuilder, Retryable};
use url::Url;

use crate::SourceError;

/// A read-only client against the L2 execution client's non-authenticated
/// JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct L2Client {
    provider: RootProvider,
}

impl L2Client {
    /// Builds a client against `url`.
    pub fn new(url: Url) -> Self {
        let provider = ProviderBuilder::new().connect_http(url);
        Self { provider }
    }

    fn backoff() -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(500))
            .with_max_delay(Duration::from_secs(4))
            .with_max_times(5)
            .with_jitter()
    }

    /// `eth_chainId`.
    pub async fn chain_id(&self) -> Result<u64, SourceError> {
        (|| async { self.provider.get_chain_id().await })
            .retry(Self::backoff())
            .await
            .map_err(|e| SourceError::Rpc(e.to_string()))
    }

    /// The current L2 chain head: `(number, hash, timestamp)`.
    pub async fn head(&self) -> Result<(u64, B256, u64), SourceError> {
        let block = (|| async {
            self.provider.get_block_by_number(alloy_eips::BlockNumberOrTag::Latest).await
        })
        .retry(Self::backoff())
        .await
        .map_err(|e| SourceError::Rpc(e.to_string()))?
        .ok_or_else(|| SourceError::Rpc("L2 client has no head block".to_owned()))?;

        Ok((block.header.inner.number, block.header.hash, block.header.inner.timestamp))
    }

    /// `eth_getBlockReceipts` for block `n`, used by the event decoder and
    /// the validator's observed-data aggregation.
    pub async fn block_receipts(&self, n: u64) -> Result<Vec<TransactionReceipt>, SourceError> {
        (|| async { self.provider.get_block_receipts(n.into()).await })
            .retry(Self::backoff())
            .await
            .map_err(|e| SourceError::Rpc(e.to_string()))
            .map(Option::unwrap_or_default)
    }

    /// `eth_call` at `block`, returning the raw return data (empty on a
    /// revert the caller treats as "not found").
    pub async fn call(&self, request: TransactionRequest, block: BlockId) -> Result<Bytes, SourceError> {
        (|| async { self.provider.call(request.clone()).block(block).await })
            .retry(Self::backoff())
            .await
            .map_err(|e| SourceError::Rpc(e.to_string()))
    }

    /// `eth_getStorageAt` for `address`/`slot` at `block`.
    pub async fn storage_at(
        &self,
        address: Address,
        slot: U256,
        block: BlockId,
    ) -> Result<B256, SourceError> {
        let value = (|| async { self.provider.get_storage_at(address, slot).block_id(block).await })
            .retry(Self::backoff())
            .await
            .map_err(|e| SourceError::Rpc(e.to_string()))?;

        Ok(B256::from(value.to_be_bytes()))
    }
}
