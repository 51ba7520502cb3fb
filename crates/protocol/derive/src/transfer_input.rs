//! ESIP-1/ESIP-5: transfers expressed as raw transaction input, one or more
//! concatenated 32-byte ethscription transaction hashes.

use alloy_primitives::B256;
use ethd_protocol::{L1Transaction, Operation};

/// Runs the transfer-from-input rule. `input_no_prefix` must be a non-empty
/// concatenation of 32-byte (64 hex char) values; an odd chunk count emits
/// nothing. Emits one [`Operation::Transfer`] per chunk, in input order —
/// the ESIP-5 multi-transfer case is simply more than one chunk.
pub fn detect_transfer_from_input(tx: &L1Transaction, ops: &mut Vec<Operation>) {
    let Some(to) = tx.to else { return };
    let hex = tx.input_no_prefix();

    if hex.is_empty() || hex.len() % 64 != 0 {
        return;
    }

    for chunk in hex.as_bytes().chunks(64) {
        let chunk = core::str::from_utf8(chunk).expect("hex::encode output is ASCII");
        let Ok(bytes) = alloy_primitives::hex::decode(chunk) else { continue };
        let Ok(bytes) = <[u8; 32]>::try_from(bytes.as_slice()) else { continue };
        ops.push(Operation::Transfer { from: tx.from, to, ethscription_tx_hash: B256::from(bytes) });
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Address, Bytes, address};
    use ethd_protocol::TxStatus;

    use super::*;

    fn tx(input: &[u8]) -> L1Transaction {
        L1Transaction {
            hash: B256::ZERO,
            index: 0,
            from: address!("0x1111111111111111111111111111111111111111"),
            to: Some(address!("0x2222222222222222222222222222222222222222")),
            input: Bytes::copy_from_slice(input),
            status: TxStatus::Success,
            logs: Vec::new(),
        }
    }

    #[test]
    fn emits_one_transfer_for_a_single_32_byte_input() {
        let hash = B256::repeat_byte(0xab);
        let t = tx(hash.as_slice());
        let mut ops = Vec::new();
        detect_transfer_from_input(&t, &mut ops);
        assert_eq!(
            ops,
            vec![Operation::Transfer { from: t.from, to: t.to.unwrap(), ethscription_tx_hash: hash }]
        );
    }

    #[test]
    fn emits_one_transfer_per_chunk_for_a_multi_transfer_input() {
        let a = B256::repeat_byte(0x11);
        let b = B256::repeat_byte(0x22);
        let mut input = Vec::new();
        input.extend_from_slice(a.as_slice());
        input.extend_from_slice(b.as_slice());
        let t = tx(&input);
        let mut ops = Vec::new();
        detect_transfer_from_input(&t, &mut ops);
        assert_eq!(ops.len(), 2);
        assert!(matches!(ops[0], Operation::Transfer { ethscription_tx_hash, .. } if ethscription_tx_hash == a));
        assert!(matches!(ops[1], Operation::Transfer { ethscription_tx_hash, .. } if ethscription_tx_hash == b));
    }

    #[test]
    fn odd_length_input_emits_no_transfers() {
        let t = tx(&[0xab; 33]);
        let mut ops = Vec::new();
        detect_transfer_from_input(&t, &mut ops);
        assert!(ops.is_empty());
    }

    #[test]
    fn no_recipient_emits_no_transfers() {
        let hash = B256::repeat_byte(0xab);
        let mut t = tx(hash.as_slice());
        t.to = None;
        let mut ops = Vec::new();
        detect_transfer_from_input(&t, &mut ops);
        assert!(ops.is_empty());
    }
}
