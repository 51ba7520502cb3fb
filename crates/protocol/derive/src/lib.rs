//! Pure classification of L1 transactions into Ethscriptions protocol operations.
//!
//! The detector never reads contract state and never raises on malformed input: a
//! rule that cannot decode its input silently contributes nothing, per the error
//! taxonomy that treats the contracts as the sole arbiter of semantic validity.

mod data_uri;
mod esip3;
mod esip1;
mod transfer_input;
mod token_params;

use ethd_genesis::{Esip, NetworkConfig};
use ethd_protocol::{L1Transaction, Operation};

pub use data_uri::DataUri;

/// Classifies `tx` into an ordered list of [`Operation`]s.
///
/// Rules run in a fixed order (create-from-input, create-from-event, transfer-from-
/// input, transfer-from-event) and each independently contributes operations; the
/// only cross-rule interaction is that a successful create-from-input suppresses
/// the transfer-from-input rule for the same transaction.
pub fn detect(tx: &L1Transaction, config: &NetworkConfig, l1_block_number: u64) -> Vec<Operation> {
    let mut ops = Vec::new();

    let created_from_input = data_uri::detect_create_from_input(tx, &mut ops);

    if config.is_esip_active(Esip::Esip3, l1_block_number) {
        esip3::detect_create_from_event(tx, &mut ops);
    }

    if !created_from_input {
        transfer_input::detect_transfer_from_input(tx, &mut ops);
    }

    if config.is_esip_active(Esip::Esip1, l1_block_number) {
        esip1::detect_transfer_from_event(tx, config, l1_block_number, &mut ops);
    }

    ops
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Address, B256, Bytes, address};
    use ethd_genesis::Network;
    use ethd_protocol::{L1Transaction, TxStatus};
    use rstest::rstest;

    use super::*;

    fn tx_with_input(to: Option<Address>, input: &str) -> L1Transaction {
        L1Transaction {
            hash: B256::ZERO,
            index: 0,
            from: address!("0x1111111111111111111111111111111111111111"),
            to,
            input: Bytes::from(input.as_bytes().to_vec()),
            status: TxStatus::Success,
            logs: Vec::new(),
        }
    }

    fn testnet_config() -> NetworkConfig {
        NetworkConfig::for_network(
            Network::Sepolia,
            address!("0x2222222222222222222222222222222222222222"),
            0,
        )
    }

    #[rstest]
    #[case("data:,hello")]
    #[case("data:image/png;base64,iVBORw0K")]
    fn detects_a_single_create_from_valid_data_uri(#[case] uri: &str) {
        let tx = tx_with_input(Some(Address::ZERO), uri);
        let ops = detect(&tx, &testnet_config(), 0);
        assert_eq!(ops.len(), 1);
        assert!(ops[0].is_create());
    }

    #[test]
    fn rejects_create_when_to_is_null() {
        let tx = tx_with_input(None, "data:,hello");
        let ops = detect(&tx, &testnet_config(), 0);
        assert!(!ops.iter().any(Operation::is_create));
    }

    #[test]
    fn non_data_uri_input_falls_through_to_transfer_detection() {
        let hash = B256::repeat_byte(0xab);
        let mut input = Vec::new();
        input.extend_from_slice(hash.as_slice());
        let tx = L1Transaction {
            hash: B256::ZERO,
            index: 0,
            from: Address::ZERO,
            to: Some(Address::ZERO),
            input: Bytes::from(input),
            status: TxStatus::Success,
            logs: Vec::new(),
        };
        let ops = detect(&tx, &testnet_config(), 0);
        assert_eq!(ops.len(), 1);
        assert!(matches!(ops[0], Operation::Transfer { .. }));
    }
}
