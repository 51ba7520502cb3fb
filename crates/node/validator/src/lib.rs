//! Reconciles derived L2 state against the independent reference
//! Ethscriptions indexer: fetches what the reference API expected for an L1
//! block, decodes what actually landed on L2, and cross-checks both against
//! the Ethscriptions contract's own storage.

mod error;
mod genesis_creations;
mod reconcile;
mod reference_client;

use std::{collections::HashMap, sync::Arc};

use alloy_primitives::{B256, U256};
use ethd_genesis::NetworkConfig;
use ethd_protocol::{ExpectedCreation, L1Log, ValidationResult, ValidationStats};
use ethd_sources::L2Client;
use ethd_storage::{BlockTag, StorageReader};
use sha2::{Digest, Sha256};

pub use error::ReferenceApiError;
pub use genesis_creations::genesis_creations;
pub use reconcile::{CompareOutcome, compare};
pub use reference_client::ReferenceApiClient;

/// Cross-checks one L1 block's worth of derived L2 state.
#[derive(Debug, Clone)]
pub struct Validator {
    reference: ReferenceApiClient,
    l2: L2Client,
    storage: StorageReader,
    config: Arc<NetworkConfig>,
}

impl Validator {
    /// Builds a validator reading observed state from `l2`/`storage` and
    /// expected state from `reference`.
    pub const fn new(
        reference: ReferenceApiClient,
        l2: L2Client,
        storage: StorageReader,
        config: Arc<NetworkConfig>,
    ) -> Self {
        Self { reference, l2, storage, config }
    }

    /// Reconciles the L2 blocks derived from `l1_block_number` against the
    /// reference API and the Ethscriptions contract's storage, as of
    /// `storage_block` (the last L2 block hash produced by this tick, used
    /// for a reorg-safe read).
    pub async fn validate(
        &self,
        l1_block_number: u64,
        l2_block_numbers: &[u64],
        storage_block: BlockTag,
    ) -> ValidationResult {
        let mut expected = match self.reference.fetch_block_data(l1_block_number).await {
            Ok(expected) => expected,
            Err(_) => return ValidationResult::api_unavailable(l1_block_number),
        };

        let is_genesis_tick = l1_block_number == self.config.l2_genesis_l1_block + 1;
        if is_genesis_tick {
            expected.creations.extend(genesis_creations().iter().cloned());
        }

        let mut receipt_logs = Vec::new();
        for &n in l2_block_numbers {
            match self.l2.block_receipts(n).await {
                Ok(receipts) => {
                    for receipt in receipts {
                        receipt_logs.push(convert_logs(&receipt));
                    }
                }
                Err(e) => {
                    return ValidationResult::failure(
                        l1_block_number,
                        vec![format!("failed to fetch L2 block {n} receipts: {e}")],
                        ValidationStats::default(),
                    );
                }
            }
        }

        let observed = ethd_events::decode_block_receipts(
            receipt_logs.iter().map(Vec::as_slice),
            self.config.addresses.ethscriptions,
        );

        let token_to_tx_hash: HashMap<u64, B256> = observed
            .creations
            .iter()
            .map(|c| (u64::try_from(c.ethscription_number).unwrap_or(u64::MAX), c.tx_hash))
            .collect();

        let outcome = reconcile::compare(&expected, &observed, is_genesis_tick);
        let mut errors = outcome.errors;
        let mut storage_checks = 0u64;

        for creation in &outcome.creations_to_check {
            storage_checks += 1;
            if let Err(e) = self.check_storage(creation, l1_block_number, is_genesis_tick, storage_block).await {
                errors.push(e);
            }
        }

        for (token_id, expected_owner) in &outcome.final_owners {
            storage_checks += 1;
            let Some(&tx_hash) = token_to_tx_hash.get(token_id) else {
                errors.push(format!("token {token_id}: no observed creation to resolve its tx hash"));
                continue;
            };
            match self.storage.get_owner(tx_hash, storage_block).await {
                Ok(Some(owner)) if owner == *expected_owner => {}
                Ok(Some(owner)) => {
                    errors.push(format!("token {token_id}: stored owner {owner} != expected {expected_owner}"));
                }
                Ok(None) => errors.push(format!("token {token_id}: owner lookup reverted")),
                Err(e) => errors.push(format!("token {token_id}: owner lookup failed: {e}")),
            }
        }

        let stats = ValidationStats { storage_checks, ..outcome.stats };

        if errors.is_empty() {
            ValidationResult::success(l1_block_number, stats)
        } else {
            ValidationResult::failure(l1_block_number, errors, stats)
        }
    }

    async fn check_storage(
        &self,
        creation: &ExpectedCreation,
        l1_block_number: u64,
        is_genesis_tick: bool,
        storage_block: BlockTag,
    ) -> Result<(), String> {
        let hash = format!("{:#x}", creation.tx_hash);

        let with_content = self
            .storage
            .get_ethscription_with_content(creation.tx_hash, storage_block)
            .await
            .map_err(|e| format!("storage read failed for {hash}: {e}"))?;

        let Some(with_content) = with_content else {
            return Err(format!("ethscription {hash} not found in storage"));
        };

        let metadata = with_content.metadata;
        let is_genesis_creation =
            is_genesis_tick && genesis_creations().iter().any(|g| g.tx_hash == creation.tx_hash);

        if metadata.creator != creation.creator {
            return Err(format!("storage creator mismatch for {hash}"));
        }
        if metadata.initialOwner != creation.initial_owner {
            return Err(format!("storage initial_owner mismatch for {hash}"));
        }
        if !is_genesis_creation && metadata.blockNumber != U256::from(l1_block_number) {
            return Err(format!("storage block_number mismatch for {hash}"));
        }
        if metadata.mimetype != creation.mimetype {
            return Err(format!("storage mimetype mismatch for {hash}"));
        }
        if metadata.mediaType != creation.media_type {
            return Err(format!("storage media_type mismatch for {hash}"));
        }
        if metadata.mimeSubtype != creation.mime_subtype {
            return Err(format!("storage mime_subtype mismatch for {hash}"));
        }
        if metadata.esip6 != creation.esip6 {
            return Err(format!("storage esip6 mismatch for {hash}"));
        }
        if metadata.contentSha != creation.content_sha {
            return Err(format!("storage content_sha mismatch for {hash}"));
        }
        if metadata.contentUriHash != content_uri_hash(&creation.content_uri) {
            return Err(format!("storage content_uri_hash mismatch for {hash}"));
        }

        Ok(())
    }
}

fn content_uri_hash(content_uri: &str) -> B256 {
    B256::from_slice(&Sha256::digest(content_uri.as_bytes()))
}

fn convert_logs(receipt: &alloy_rpc_types_eth::TransactionReceipt) -> Vec<L1Log> {
    receipt
        .logs()
        .iter()
        .map(|log| L1Log {
            address: log.inner.address,
            topics: log.inner.data.topics().to_vec(),
            data: log.inner.data.data.clone(),
        })
        .collect()
}
