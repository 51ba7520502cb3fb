//! ESIP-3: creations expressed as an on-chain event rather than a transaction
//! input.

use alloy_primitives::{Address, B256, keccak256};
use ethd_protocol::{L1Transaction, Operation};

/// Returns the ESIP-3 creation event signature,
/// `keccak256("ethscriptions_protocol_CreateEthscription(address,string)")`.
pub fn signature() -> B256 {
    keccak256(b"ethscriptions_protocol_CreateEthscription(address,string)")
}

/// Runs the ESIP-3 create-from-event rule, pushing an [`Operation::CreateFromEvent`]
/// for every well-formed matching log. Malformed decodes are skipped silently.
pub fn detect_create_from_event(tx: &L1Transaction, ops: &mut Vec<Operation>) {
    let sig = signature();
    for log in &tx.logs {
        if log.topics.len() != 2 || log.topics[0] != sig {
            continue;
        }
        let Some(initial_owner) = decode_address_topic(log.topics[1]) else { continue };
        let Some(content_uri) = decode_string_data(&log.data) else { continue };

        ops.push(Operation::CreateFromEvent {
            tx_hash: tx.hash,
            emitter_address: log.address,
            initial_owner,
            content_uri,
            esip6: false,
            esip7_compressed: false,
        });
    }
}

fn decode_address_topic(topic: B256) -> Option<Address> {
    Some(Address::from_slice(&topic.as_slice()[12..32]))
}

/// Decodes a single non-indexed `string` ABI parameter from event data:
/// `[offset:32][length:32][data:ceil(length/32)*32]`.
fn decode_string_data(data: &[u8]) -> Option<String> {
    if data.len() < 64 {
        return None;
    }
    let length = u32::from_be_bytes(data[60..64].try_into().ok()?) as usize;
    let start = 64;
    let end = start.checked_add(length)?;
    if data.len() < end {
        return None;
    }
    String::from_utf8(data[start..end].to_vec()).ok()
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Bytes, address};
    use ethd_protocol::{L1Log, TxStatus};

    use super::*;

    fn encode_string_data(s: &str) -> Vec<u8> {
        let mut out = vec![0u8; 32];
        out[31] = 32;
        let mut len = vec![0u8; 32];
        len[28..32].copy_from_slice(&(s.len() as u32).to_be_bytes());
        out.extend(len);
        out.extend(s.as_bytes());
        while out.len() % 32 != 0 {
            out.push(0);
        }
        out
    }

    #[test]
    fn decodes_a_well_formed_creation_event() {
        let owner = address!("0x3333333333333333333333333333333333333333");
        let mut owner_topic = [0u8; 32];
        owner_topic[12..32].copy_from_slice(owner.as_slice());

        let log = L1Log {
            address: address!("0x4444444444444444444444444444444444444444"),
            topics: vec![signature(), B256::from(owner_topic)],
            data: Bytes::from(encode_string_data("data:,hello")),
        };

        let tx = L1Transaction {
            hash: B256::ZERO,
            index: 0,
            from: Address::ZERO,
            to: None,
            input: Bytes::new(),
            status: TxStatus::Success,
            logs: vec![log],
        };

        let mut ops = Vec::new();
        detect_create_from_event(&tx, &mut ops);
        assert_eq!(ops.len(), 1);
        match &ops[0] {
            Operation::CreateFromEvent { initial_owner, content_uri, .. } => {
                assert_eq!(*initial_owner, owner);
                assert_eq!(content_uri, "data:,hello");
            }
            other => panic!("unexpected operation: {other:?}"),
        }
    }

    #[test]
    fn skips_logs_with_wrong_topic_count() {
        let log = L1Log { address: Address::ZERO, topics: vec![signature()], data: Bytes::new() };
        let tx = L1Transaction {
            hash: B256::ZERO,
            index: 0,
            from: Address::ZERO,
            to: None,
            input: Bytes::new(),
            status: TxStatus::Success,
            logs: vec![log],
        };
        let mut ops = Vec::new();
        detect_create_from_event(&tx, &mut ops);
        assert!(ops.is_empty());
    }
}
