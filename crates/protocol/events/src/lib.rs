//! Decodes L2 execution-client receipt logs into semantic Ethscriptions
//! creation and transfer records.

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::SolEvent;
use ethd_protocol::L1Log;

alloy_sol_types::sol! {
    #[derive(Debug, PartialEq, Eq)]
    event EthscriptionCreated(
        bytes32 indexed txHash,
        address indexed creator,
        address indexed initialOwner,
        bytes32 contentSha,
        uint256 ethscriptionNumber,
        uint256 pointerCount
    );

    #[derive(Debug, PartialEq, Eq)]
    event EthscriptionTransferred(
        bytes32 indexed txHash,
        address indexed from,
        address indexed to,
        uint256 ethscriptionNumber
    );
}

/// A decoded creation record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creation {
    /// The L1 ethscription transaction hash.
    pub tx_hash: B256,
    /// The account that submitted the creating L2 transaction.
    pub creator: Address,
    /// The ethscription's initial owner.
    pub initial_owner: Address,
    /// `keccak256` of the ethscription's content.
    pub content_sha: B256,
    /// The ethscription's sequential number.
    pub ethscription_number: U256,
    /// Number of on-chain "pointer" records the creation produced.
    pub pointer_count: U256,
}

/// A decoded transfer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    /// The L1 ethscription transaction hash identifying the transferred item.
    pub tx_hash: B256,
    /// The previous owner.
    pub from: Address,
    /// The new owner.
    pub to: Address,
    /// The ethscription's sequential number.
    pub ethscription_number: U256,
}

/// The decoded contents of one receipt: zero or more creations and transfers,
/// in log order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedLogs {
    /// Creations found in the receipt, in emission order.
    pub creations: Vec<Creation>,
    /// Transfers found in the receipt, in emission order.
    pub transfers: Vec<Transfer>,
}

/// Decodes every log in `logs` that was emitted by `predeploy`, dropping logs
/// that don't match a known event signature or whose topics/data don't decode.
pub fn decode_receipt_logs(logs: &[L1Log], predeploy: Address) -> DecodedLogs {
    let mut out = DecodedLogs::default();

    for log in logs {
        if log.address != predeploy {
            continue;
        }
        let Some(&signature) = log.topics.first() else { continue };

        if signature == EthscriptionCreated::SIGNATURE_HASH {
            if let Ok(event) = decode_created(log) {
                out.creations.push(Creation {
                    tx_hash: event.txHash,
                    creator: event.creator,
                    initial_owner: event.initialOwner,
                    content_sha: event.contentSha,
                    ethscription_number: event.ethscriptionNumber,
                    pointer_count: event.pointerCount,
                });
            }
        } else if signature == EthscriptionTransferred::SIGNATURE_HASH {
            if let Ok(event) = decode_transferred(log) {
                out.transfers.push(Transfer {
                    tx_hash: event.txHash,
                    from: event.from,
                    to: event.to,
                    ethscription_number: event.ethscriptionNumber,
                });
            }
        }
    }

    out
}

/// Decodes every receipt in `receipts`, aggregating results in receipt order.
pub fn decode_block_receipts<'a>(
    receipts: impl IntoIterator<Item = &'a [L1Log]>,
    predeploy: Address,
) -> DecodedLogs {
    let mut out = DecodedLogs::default();
    for logs in receipts {
        let decoded = decode_receipt_logs(logs, predeploy);
        out.creations.extend(decoded.creations);
        out.transfers.extend(decoded.transfers);
    }
    out
}

fn decode_created(log: &L1Log) -> alloy_sol_types::Result<EthscriptionCreated> {
    EthscriptionCreated::decode_raw_log(log.topics.iter().copied(), &log.data, true)
}

fn decode_transferred(log: &L1Log) -> alloy_sol_types::Result<EthscriptionTransferred> {
    EthscriptionTransferred::decode_raw_log(log.topics.iter().copied(), &log.data, true)
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Bytes, address};
    use alloy_sol_types::SolEvent;

    use super::*;

    fn topic_from_address(a: Address) -> B256 {
        let mut topic = [0u8; 32];
        topic[12..32].copy_from_slice(a.as_slice());
        B256::from(topic)
    }

    #[test]
    fn decodes_a_creation_log() {
        let predeploy = address!("0x7777777777777777777777777777777777777777");
        let creator = address!("0x1111111111111111111111111111111111111111");
        let owner = address!("0x2222222222222222222222222222222222222222");
        let tx_hash = B256::repeat_byte(0xab);
        let content_sha = B256::repeat_byte(0xcd);

        let mut data = Vec::new();
        data.extend_from_slice(content_sha.as_slice());
        data.extend_from_slice(&U256::from(1u64).to_be_bytes::<32>());
        data.extend_from_slice(&U256::from(0u64).to_be_bytes::<32>());

        let log = L1Log {
            address: predeploy,
            topics: vec![
                EthscriptionCreated::SIGNATURE_HASH,
                tx_hash,
                topic_from_address(creator),
                topic_from_address(owner),
            ],
            data: Bytes::from(data),
        };

        let decoded = decode_receipt_logs(&[log], predeploy);
        assert_eq!(decoded.creations.len(), 1);
        assert_eq!(decoded.creations[0].creator, creator);
        assert_eq!(decoded.creations[0].initial_owner, owner);
        assert_eq!(decoded.creations[0].content_sha, content_sha);
        assert!(decoded.transfers.is_empty());
    }

    #[test]
    fn ignores_logs_from_other_addresses() {
        let predeploy = address!("0x7777777777777777777777777777777777777777");
        let other = address!("0x8888888888888888888888888888888888888888");
        let log = L1Log {
            address: other,
            topics: vec![EthscriptionCreated::SIGNATURE_HASH],
            data: Bytes::new(),
        };
        let decoded = decode_receipt_logs(&[log], predeploy);
        assert!(decoded.creations.is_empty() && decoded.transfers.is_empty());
    }

    #[test]
    fn decodes_a_transfer_log() {
        let predeploy = address!("0x7777777777777777777777777777777777777777");
        let from = address!("0x1111111111111111111111111111111111111111");
        let to = address!("0x2222222222222222222222222222222222222222");
        let tx_hash = B256::repeat_byte(0xab);
        let data = U256::from(5u64).to_be_bytes::<32>().to_vec();

        let log = L1Log {
            address: predeploy,
            topics: vec![
                EthscriptionTransferred::SIGNATURE_HASH,
                tx_hash,
                topic_from_address(from),
                topic_from_address(to),
            ],
            data: Bytes::from(data),
        };

        let decoded = decode_receipt_logs(&[log], predeploy);
        assert_eq!(decoded.transfers.len(), 1);
        assert_eq!(decoded.transfers[0].from, from);
        assert_eq!(decoded.transfers[0].to, to);
    }
}
