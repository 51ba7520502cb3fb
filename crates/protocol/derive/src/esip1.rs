//! ESIP-1 and ESIP-2: transfers expressed as on-chain events rather than
//! transaction input.

use alloy_primitives::{Address, B256, keccak256};
use ethd_genesis::{Esip, NetworkConfig};
use ethd_protocol::{L1Transaction, Operation};

/// `keccak256("ethscriptions_protocol_TransferEthscription(address,bytes32)")`.
pub fn esip1_signature() -> B256 {
    keccak256(b"ethscriptions_protocol_TransferEthscription(address,bytes32)")
}

/// `keccak256("ethscriptions_protocol_TransferEthscriptionForPreviousOwner(address,address,bytes32)")`.
pub fn esip2_signature() -> B256 {
    keccak256(b"ethscriptions_protocol_TransferEthscriptionForPreviousOwner(address,address,bytes32)")
}

/// Runs the ESIP-1/ESIP-2 transfer-from-event rule. A log with the ESIP-1
/// signature and 3 topics emits [`Operation::Transfer`]; with the ESIP-2
/// signature and 4 topics (gated separately) it emits
/// [`Operation::TransferPrevOwner`]. In both cases `from` is the emitting
/// contract address, not the L1 transaction sender.
pub fn detect_transfer_from_event(
    tx: &L1Transaction,
    config: &NetworkConfig,
    l1_block_number: u64,
    ops: &mut Vec<Operation>,
) {
    let esip1_sig = esip1_signature();
    let esip2_active = config.is_esip_active(Esip::Esip2, l1_block_number);
    let esip2_sig = esip2_active.then(esip2_signature);

    for log in &tx.logs {
        if log.topics.len() == 3 && log.topics[0] == esip1_sig {
            let Some(to) = decode_address_topic(log.topics[1]) else { continue };
            let ethscription_tx_hash = log.topics[2];
            ops.push(Operation::Transfer { from: log.address, to, ethscription_tx_hash });
            continue;
        }

        if let Some(esip2_sig) = esip2_sig {
            if log.topics.len() == 4 && log.topics[0] == esip2_sig {
                let Some(expected_previous_owner) = decode_address_topic(log.topics[1]) else {
                    continue;
                };
                let Some(to) = decode_address_topic(log.topics[2]) else { continue };
                let ethscription_tx_hash = log.topics[3];
                ops.push(Operation::TransferPrevOwner {
                    from: log.address,
                    to,
                    ethscription_tx_hash,
                    expected_previous_owner,
                });
            }
        }
    }
}

fn decode_address_topic(topic: B256) -> Option<Address> {
    Some(Address::from_slice(&topic.as_slice()[12..32]))
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Bytes, address};
    use ethd_genesis::Network;
    use ethd_protocol::{L1Log, TxStatus};

    use super::*;

    fn address_topic(a: Address) -> B256 {
        let mut topic = [0u8; 32];
        topic[12..32].copy_from_slice(a.as_slice());
        B256::from(topic)
    }

    fn tx_with_logs(logs: Vec<L1Log>) -> L1Transaction {
        L1Transaction {
            hash: B256::ZERO,
            index: 0,
            from: Address::ZERO,
            to: Some(Address::ZERO),
            input: Bytes::new(),
            status: TxStatus::Success,
            logs,
        }
    }

    fn testnet_config() -> NetworkConfig {
        NetworkConfig::for_network(
            Network::Sepolia,
            address!("0x2222222222222222222222222222222222222222"),
            0,
        )
    }

    #[test]
    fn decodes_an_esip1_transfer_event() {
        let emitter = address!("0x4444444444444444444444444444444444444444");
        let to = address!("0x5555555555555555555555555555555555555555");
        let hash = B256::repeat_byte(0x11);
        let log = L1Log {
            address: emitter,
            topics: vec![esip1_signature(), address_topic(to), hash],
            data: Bytes::new(),
        };
        let tx = tx_with_logs(vec![log]);
        let mut ops = Vec::new();
        detect_transfer_from_event(&tx, &testnet_config(), 0, &mut ops);
        assert_eq!(
            ops,
            vec![Operation::Transfer { from: emitter, to, ethscription_tx_hash: hash }]
        );
    }

    #[test]
    fn decodes_an_esip2_transfer_with_previous_owner() {
        let emitter = address!("0x4444444444444444444444444444444444444444");
        let prev = address!("0x6666666666666666666666666666666666666666");
        let to = address!("0x5555555555555555555555555555555555555555");
        let hash = B256::repeat_byte(0x22);
        let log = L1Log {
            address: emitter,
            topics: vec![esip2_signature(), address_topic(prev), address_topic(to), hash],
            data: Bytes::new(),
        };
        let tx = tx_with_logs(vec![log]);
        let mut ops = Vec::new();
        detect_transfer_from_event(&tx, &testnet_config(), 0, &mut ops);
        assert_eq!(
            ops,
            vec![Operation::TransferPrevOwner {
                from: emitter,
                to,
                ethscription_tx_hash: hash,
                expected_previous_owner: prev,
            }]
        );
    }

    #[test]
    fn ignores_esip2_logs_when_esip2_is_not_active() {
        let mainnet_pre_esip2 = NetworkConfig::for_network(
            Network::Mainnet,
            address!("0x2222222222222222222222222222222222222222"),
            0,
        );
        let emitter = address!("0x4444444444444444444444444444444444444444");
        let log = L1Log {
            address: emitter,
            topics: vec![
                esip2_signature(),
                address_topic(Address::ZERO),
                address_topic(Address::ZERO),
                B256::ZERO,
            ],
            data: Bytes::new(),
        };
        let tx = tx_with_logs(vec![log]);
        let mut ops = Vec::new();
        detect_transfer_from_event(&tx, &mainnet_pre_esip2, 0, &mut ops);
        assert!(ops.is_empty());
    }
}
