//! Pure comparison logic: reference-API expectations vs. on-chain observed
//! events. Storage-level checks live in [`crate::Validator`], since they
//! require async contract reads.

use std::collections::HashSet;

use alloy_primitives::Address;
use ethd_events::DecodedLogs;
use ethd_protocol::{ExpectedBlockData, ExpectedCreation, ValidationStats};

/// The result of comparing creation/transfer sets, before storage checks.
pub struct CompareOutcome {
    /// Divergences found comparing event-level data.
    pub errors: Vec<String>,
    /// Counts covering the event-level comparison.
    pub stats: ValidationStats,
    /// Creations to run storage checks against (the full expected set,
    /// including genesis augmentation).
    pub creations_to_check: Vec<ExpectedCreation>,
    /// Per-token expected final owner, from the last transfer of each token
    /// observed in this batch's expected transfers.
    pub final_owners: Vec<(u64, Address)>,
}

/// Compares `expected` against `observed`. At the L1 block producing L2
/// block 1, unexpected creations/transfers are informational only (the
/// caller still includes `genesis_creations` in `expected` before calling
/// this).
pub fn compare(expected: &ExpectedBlockData, observed: &DecodedLogs, is_genesis_tick: bool) -> CompareOutcome {
    let mut errors = Vec::new();

    let observed_hashes: HashSet<B256Hex> = observed.creations.iter().map(|c| hex(c.tx_hash)).collect();
    let expected_hashes: HashSet<B256Hex> = expected.creations.iter().map(|c| hex(c.tx_hash)).collect();

    for hash in expected_hashes.difference(&observed_hashes) {
        errors.push(format!("missing creation: {hash}"));
    }
    if !is_genesis_tick {
        for hash in observed_hashes.difference(&expected_hashes) {
            errors.push(format!("unexpected creation: {hash}"));
        }
    }

    for expected_creation in &expected.creations {
        let hash = hex(expected_creation.tx_hash);
        let Some(observed_creation) = observed.creations.iter().find(|c| hex(c.tx_hash) == hash) else {
            continue;
        };
        if observed_creation.creator != expected_creation.creator {
            errors.push(format!("creator mismatch for {hash}"));
        }
        if observed_creation.initial_owner != expected_creation.initial_owner {
            errors.push(format!("initial_owner mismatch for {hash}"));
        }
    }

    let mut expected_transfers: Vec<(u64, Address, Address)> =
        expected.transfers.iter().map(|t| (t.token_id, t.from, t.to)).collect();
    let mut observed_transfers: Vec<(u64, Address, Address)> = observed
        .transfers
        .iter()
        .map(|t| (u64::try_from(t.ethscription_number).unwrap_or(u64::MAX), t.from, t.to))
        .collect();
    expected_transfers.sort();
    observed_transfers.sort();

    if expected_transfers != observed_transfers && !is_genesis_tick {
        errors.push(format!(
            "transfer multiset mismatch: expected {} observed {}",
            expected_transfers.len(),
            observed_transfers.len()
        ));
    }

    let mut final_owners: Vec<(u64, Address)> = Vec::new();
    for transfer in &expected.transfers {
        if let Some(entry) = final_owners.iter_mut().find(|(id, _)| *id == transfer.token_id) {
            entry.1 = transfer.to;
        } else {
            final_owners.push((transfer.token_id, transfer.to));
        }
    }

    let stats = ValidationStats {
        expected_creations: expected.creations.len() as u64,
        observed_creations: observed.creations.len() as u64,
        expected_transfers: expected.transfers.len() as u64,
        observed_transfers: observed.transfers.len() as u64,
        storage_checks: 0,
    };

    CompareOutcome { errors, stats, creations_to_check: expected.creations.clone(), final_owners }
}

type B256Hex = String;

fn hex(hash: alloy_primitives::B256) -> B256Hex {
    format!("{hash:#x}")
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{B256, U256, address};
    use ethd_events::{Creation, Transfer};
    use ethd_protocol::{ExpectedCreation, ExpectedTransfer};

    use super::*;

    fn creation(tx_hash: B256, creator: Address, initial_owner: Address) -> ExpectedCreation {
        ExpectedCreation {
            tx_hash,
            creator,
            initial_owner,
            content_uri: String::new(),
            content_sha: B256::ZERO,
            mimetype: String::new(),
            media_type: String::new(),
            mime_subtype: String::new(),
            esip6: false,
        }
    }

    #[test]
    fn matching_creation_sets_produce_no_errors() {
        let creator = address!("0x1111111111111111111111111111111111111111");
        let owner = address!("0x2222222222222222222222222222222222222222");
        let tx_hash = B256::repeat_byte(1);

        let expected = ExpectedBlockData {
            l1_block_number: 100,
            creations: vec![creation(tx_hash, creator, owner)],
            transfers: vec![],
        };
        let observed = DecodedLogs {
            creations: vec![Creation {
                tx_hash,
                creator,
                initial_owner: owner,
                content_sha: B256::ZERO,
                ethscription_number: U256::from(1),
                pointer_count: U256::ZERO,
            }],
            transfers: vec![],
        };

        let outcome = compare(&expected, &observed, false);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn missing_creation_is_an_error() {
        let expected = ExpectedBlockData {
            l1_block_number: 100,
            creations: vec![creation(B256::repeat_byte(1), Address::ZERO, Address::ZERO)],
            transfers: vec![],
        };
        let observed = DecodedLogs::default();

        let outcome = compare(&expected, &observed, false);
        assert_eq!(outcome.errors.len(), 1);
    }

    #[test]
    fn unexpected_creation_is_informational_at_the_genesis_tick() {
        let expected = ExpectedBlockData { l1_block_number: 100, creations: vec![], transfers: vec![] };
        let observed = DecodedLogs {
            creations: vec![Creation {
                tx_hash: B256::repeat_byte(9),
                creator: Address::ZERO,
                initial_owner: Address::ZERO,
                content_sha: B256::ZERO,
                ethscription_number: U256::from(1),
                pointer_count: U256::ZERO,
            }],
            transfers: vec![],
        };

        assert!(compare(&expected, &observed, true).errors.is_empty());
        assert_eq!(compare(&expected, &observed, false).errors.len(), 1);
    }

    #[test]
    fn transfer_multiset_mismatch_is_an_error() {
        let expected = ExpectedBlockData {
            l1_block_number: 100,
            creations: vec![],
            transfers: vec![ExpectedTransfer {
                token_id: 1,
                from: address!("0x1111111111111111111111111111111111111111"),
                to: address!("0x2222222222222222222222222222222222222222"),
            }],
        };
        let observed = DecodedLogs::default();

        let outcome = compare(&expected, &observed, false);
        assert_eq!(outcome.errors.len(), 1);
    }

    #[test]
    fn final_owner_tracks_the_last_transfer_per_token() {
        let a = address!("0x1111111111111111111111111111111111111111");
        let b = address!("0x2222222222222222222222222222222222222222");
        let c = address!("0x3333333333333333333333333333333333333333");

        let expected = ExpectedBlockData {
            l1_block_number: 100,
            creations: vec![],
            transfers: vec![
                ExpectedTransfer { token_id: 7, from: a, to: b },
                ExpectedTransfer { token_id: 7, from: b, to: c },
            ],
        };
        let outcome = compare(&expected, &DecodedLogs::default(), true);
        assert_eq!(outcome.final_owners, vec![(7, c)]);
    }
}
