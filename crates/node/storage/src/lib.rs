//! Typed `eth_call` helpers against the Ethscriptions contract, at any block
//! reference including the EIP-1898 hash form required for reorg-safe
//! validator reads.

mod abi;
mod block_tag;
mod error;

use alloy_primitives::{Address, B256, Bytes, U256};
use alloy_rpc_types_eth::TransactionRequest;
use alloy_sol_types::SolCall;
use ethd_sources::L2Client;

pub use abi::EthscriptionMetadata;
pub use block_tag::BlockTag;
pub use error::StorageError;

/// Combined metadata and raw content for one ethscription.
#[derive(Debug, Clone)]
pub struct EthscriptionWithContent {
    /// On-chain metadata.
    pub metadata: EthscriptionMetadata,
    /// Raw content bytes.
    pub content: Bytes,
}

/// Reads Ethscriptions contract state via `eth_call`.
#[derive(Debug, Clone)]
pub struct StorageReader {
    client: L2Client,
    contract: Address,
}

impl StorageReader {
    /// Builds a reader against `contract` on `client`.
    pub const fn new(client: L2Client, contract: Address) -> Self {
        Self { client, contract }
    }

    /// `getEthscription(tx_hash)`, or `None` on a contract revert (not
    /// found).
    pub async fn get_ethscription(
        &self,
        tx_hash: B256,
        block: BlockTag,
    ) -> Result<Option<EthscriptionMetadata>, StorageError> {
        let call = abi::getEthscriptionCall { transactionHash: tx_hash };
        self.call_decoding::<abi::getEthscriptionCall>(call, block).await
    }

    /// `getEthscriptionContent(tx_hash)`, or `None` on a contract revert.
    pub async fn get_ethscription_content(
        &self,
        tx_hash: B256,
        block: BlockTag,
    ) -> Result<Option<Bytes>, StorageError> {
        let call = abi::getEthscriptionContentCall { transactionHash: tx_hash };
        self.call_decoding::<abi::getEthscriptionContentCall>(call, block).await
    }

    /// Combines [`Self::get_ethscription`] and
    /// [`Self::get_ethscription_content`] into one result, or `None` if
    /// either reverts.
    pub async fn get_ethscription_with_content(
        &self,
        tx_hash: B256,
        block: BlockTag,
    ) -> Result<Option<EthscriptionWithContent>, StorageError> {
        let Some(metadata) = self.get_ethscription(tx_hash, block).await? else { return Ok(None) };
        let Some(content) = self.get_ethscription_content(tx_hash, block).await? else {
            return Ok(None);
        };
        Ok(Some(EthscriptionWithContent { metadata, content }))
    }

    /// `getOwner(tx_hash)`, or `None` on a contract revert.
    pub async fn get_owner(
        &self,
        tx_hash: B256,
        block: BlockTag,
    ) -> Result<Option<Address>, StorageError> {
        let call = abi::getOwnerCall { transactionHash: tx_hash };
        self.call_decoding::<abi::getOwnerCall>(call, block).await
    }

    /// `totalSupply()`. Unlike the other reads, a revert here indicates a
    /// real fault (the contract is always able to report its total supply)
    /// and is surfaced as an error rather than `None`.
    pub async fn get_total_supply(&self, block: BlockTag) -> Result<U256, StorageError> {
        let data = abi::totalSupplyCall {}.abi_encode();
        let request = TransactionRequest::default().to(self.contract).input(data.into());
        let raw = self.client.call(request, block.into()).await?;
        abi::totalSupplyCall::abi_decode_returns(&raw).map_err(|e| StorageError::Decode(e.to_string()))
    }

    async fn call_decoding<C: SolCall>(
        &self,
        call: C,
        block: BlockTag,
    ) -> Result<Option<C::Return>, StorageError> {
        let data = call.abi_encode();
        let request = TransactionRequest::default().to(self.contract).input(data.into());

        // Read-only getters against a well-formed ethscription reference only fail
        // via a contract revert (not found); treat any call failure as `None`.
        let Ok(raw) = self.client.call(request, block.into()).await else { return Ok(None) };
        if raw.is_empty() {
            return Ok(None);
        }

        C::abi_decode_returns(&raw).map(Some).map_err(|e| StorageError::Decode(e.to_string()))
    }
}
