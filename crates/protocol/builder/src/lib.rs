//! ABI-encodes Ethscriptions protocol operations into Optimism-style deposit
//! transactions, and encodes the per-block L1-attributes system deposit.

mod abi;
mod l1_attributes;
mod mimetype;
mod source_hash;

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use ethd_genesis::SystemAddresses;
use ethd_protocol::{DepositTransaction, L1AttributesDeposit, Operation};

pub use l1_attributes::build as build_l1_attributes;

/// Gas limit given to every operation-derived deposit. The execution client
/// enforces the contract's own gas accounting; this only bounds the deposit's
/// declared intrinsic gas.
const OPERATION_DEPOSIT_GAS: u64 = 1_000_000;

/// Builds the deposit transaction for one classified operation, or `None` if
/// the operation fails a well-formedness check (empty content URI for an
/// unconditional create, a zero ethscription hash). The contracts remain the
/// final arbiter of semantic validity such as duplicates or ownership.
pub fn build(
    op: &Operation,
    l1_block_hash: alloy_primitives::B256,
    index: u64,
    ethscriptions: Address,
) -> Option<DepositTransaction> {
    let source_hash = source_hash::user_deposit(l1_block_hash, index);

    match op {
        Operation::CreateFromInput {
            tx_hash,
            from,
            initial_owner,
            content_uri,
            esip6,
            esip7_compressed,
            token_params,
        } => {
            if content_uri.is_empty() {
                return None;
            }
            let data = encode_create(
                *tx_hash,
                *initial_owner,
                content_uri,
                *esip6,
                *esip7_compressed,
                token_params.as_ref(),
            );
            Some(deposit(source_hash, *from, ethscriptions, data))
        }
        Operation::CreateFromEvent {
            tx_hash,
            emitter_address,
            initial_owner,
            content_uri,
            esip6,
            esip7_compressed,
        } => {
            if content_uri.is_empty() {
                return None;
            }
            let data =
                encode_create(*tx_hash, *initial_owner, content_uri, *esip6, *esip7_compressed, None);
            Some(deposit(source_hash, *emitter_address, ethscriptions, data))
        }
        Operation::Transfer { from, to, ethscription_tx_hash } => {
            if ethscription_tx_hash.is_zero() {
                return None;
            }
            let data = abi::transferEthscriptionCall { to: *to, ethscriptionTxHash: *ethscription_tx_hash }
                .abi_encode();
            Some(deposit(source_hash, *from, ethscriptions, Bytes::from(data)))
        }
        Operation::TransferPrevOwner { from, to, ethscription_tx_hash, expected_previous_owner } => {
            if ethscription_tx_hash.is_zero() {
                return None;
            }
            let data = abi::transferEthscriptionForPreviousOwnerCall {
                to: *to,
                ethscriptionTxHash: *ethscription_tx_hash,
                expectedPreviousOwner: *expected_previous_owner,
            }
            .abi_encode();
            Some(deposit(source_hash, *from, ethscriptions, Bytes::from(data)))
        }
        Operation::MultiTransfer { .. } => None,
    }
}

/// Expands a [`Operation::MultiTransfer`] into its constituent one-hash
/// deposits, one `transferEthscription` call per hash, matching the
/// contract's partial-success semantics. The caller must account for one
/// source-hash index per emitted deposit.
pub fn expand_multi_transfer(
    from: Address,
    to: Address,
    ethscription_tx_hashes: &[alloy_primitives::B256],
    l1_block_hash: alloy_primitives::B256,
    first_index: u64,
    ethscriptions: Address,
) -> Vec<DepositTransaction> {
    ethscription_tx_hashes
        .iter()
        .enumerate()
        .filter(|(_, hash)| !hash.is_zero())
        .map(|(offset, hash)| {
            let source_hash = source_hash::user_deposit(l1_block_hash, first_index + offset as u64);
            let data =
                abi::transferEthscriptionCall { to, ethscriptionTxHash: *hash }.abi_encode();
            deposit(source_hash, from, ethscriptions, Bytes::from(data))
        })
        .collect()
}

fn encode_create(
    tx_hash: alloy_primitives::B256,
    initial_owner: Address,
    content_uri: &str,
    esip6: bool,
    esip7_compressed: bool,
    token_params: Option<&ethd_protocol::TokenParams>,
) -> Bytes {
    let (mimetype, media_type, mime_subtype) = mimetype::parse(content_uri);

    let sol_token_params = match token_params {
        Some(params) => abi::TokenParams {
            op: params.operation.clone(),
            protocol: params.protocol.clone(),
            tick: params.tick.clone(),
            max: params.max.clone().unwrap_or_default(),
            lim: params.lim.clone().unwrap_or_default(),
            amt: params.amt.clone().unwrap_or_default(),
        },
        None => abi::TokenParams {
            op: String::new(),
            protocol: String::new(),
            tick: String::new(),
            max: String::new(),
            lim: String::new(),
            amt: String::new(),
        },
    };

    let params = abi::CreateEthscriptionParams {
        transactionHash: tx_hash,
        initialOwner: initial_owner,
        contentUri: content_uri.to_owned(),
        mimetype,
        mediaType: media_type,
        mimeSubtype: mime_subtype,
        esip6,
        isCompressed: esip7_compressed,
        tokenParams: sol_token_params,
    };

    Bytes::from(abi::createEthscriptionCall { params }.abi_encode())
}

fn deposit(source_hash: alloy_primitives::B256, from: Address, to: Address, data: Bytes) -> DepositTransaction {
    DepositTransaction {
        source_hash,
        from,
        to: Some(to),
        mint: U256::ZERO,
        value: U256::ZERO,
        gas: OPERATION_DEPOSIT_GAS,
        is_system_tx: false,
        data,
    }
}

/// Builds a full L2 block's deposit list: the L1-attributes deposit first,
/// followed by one deposit per operation in the order supplied.
pub fn build_block(
    attrs: &L1AttributesDeposit,
    addresses: &SystemAddresses,
    operations: &[(Operation, u64)],
    l1_block_hash: alloy_primitives::B256,
) -> Vec<DepositTransaction> {
    let mut deposits = Vec::with_capacity(operations.len() + 1);
    deposits.push(build_l1_attributes(attrs, addresses));

    for (op, index) in operations {
        if let Operation::MultiTransfer { from, to, ethscription_tx_hashes } = op {
            deposits.extend(expand_multi_transfer(
                *from,
                *to,
                ethscription_tx_hashes,
                l1_block_hash,
                *index,
                addresses.ethscriptions,
            ));
        } else if let Some(tx) = build(op, l1_block_hash, *index, addresses.ethscriptions) {
            deposits.push(tx);
        }
    }

    deposits
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{B256, address};
    use ethd_protocol::TokenParams;

    use super::*;

    fn ethscriptions() -> Address {
        address!("0x2222222222222222222222222222222222222222")
    }

    #[test]
    fn builds_a_create_from_input_deposit() {
        let op = Operation::CreateFromInput {
            tx_hash: B256::repeat_byte(1),
            from: address!("0x1111111111111111111111111111111111111111"),
            initial_owner: address!("0x3333333333333333333333333333333333333333"),
            content_uri: "data:,hello".to_owned(),
            esip6: false,
            esip7_compressed: false,
            token_params: None,
        };
        let tx = build(&op, B256::repeat_byte(0xaa), 0, ethscriptions()).unwrap();
        assert_eq!(tx.to, Some(ethscriptions()));
        assert_eq!(tx.from, address!("0x1111111111111111111111111111111111111111"));
        assert_eq!(&tx.data[..4], &abi::createEthscriptionCall::SELECTOR);
    }

    #[test]
    fn rejects_create_with_empty_content_uri() {
        let op = Operation::CreateFromInput {
            tx_hash: B256::ZERO,
            from: ethscriptions(),
            initial_owner: Address::ZERO,
            content_uri: String::new(),
            esip6: false,
            esip7_compressed: false,
            token_params: None,
        };
        assert!(build(&op, B256::ZERO, 0, ethscriptions()).is_none());
    }

    #[test]
    fn builds_a_transfer_deposit_with_from_equal_to_log_address() {
        let op = Operation::Transfer {
            from: address!("0x3333333333333333333333333333333333333333"),
            to: address!("0x4444444444444444444444444444444444444444"),
            ethscription_tx_hash: B256::repeat_byte(7),
        };
        let tx = build(&op, B256::ZERO, 1, ethscriptions()).unwrap();
        assert_eq!(tx.from, address!("0x3333333333333333333333333333333333333333"));
        assert_eq!(&tx.data[..4], &abi::transferEthscriptionCall::SELECTOR);
    }

    #[test]
    fn rejects_transfer_with_zero_hash() {
        let op = Operation::Transfer { from: Address::ZERO, to: Address::ZERO, ethscription_tx_hash: B256::ZERO };
        assert!(build(&op, B256::ZERO, 0, ethscriptions()).is_none());
    }

    #[test]
    fn multi_transfer_expands_one_deposit_per_non_zero_hash() {
        let hashes = vec![B256::repeat_byte(1), B256::ZERO, B256::repeat_byte(2)];
        let deposits = expand_multi_transfer(
            address!("0x5555555555555555555555555555555555555555"),
            address!("0x6666666666666666666666666666666666666666"),
            &hashes,
            B256::ZERO,
            0,
            ethscriptions(),
        );
        assert_eq!(deposits.len(), 2);
    }

    #[test]
    fn token_params_round_trip_into_the_encoded_call() {
        let op = Operation::CreateFromInput {
            tx_hash: B256::ZERO,
            from: ethscriptions(),
            initial_owner: Address::ZERO,
            content_uri: "data:,{\"p\":\"erc-20\"}".to_owned(),
            esip6: true,
            esip7_compressed: false,
            token_params: Some(TokenParams {
                protocol: "erc-20".to_owned(),
                operation: "mint".to_owned(),
                tick: "eths".to_owned(),
                max: None,
                lim: None,
                amt: Some("1000".to_owned()),
            }),
        };
        let tx = build(&op, B256::ZERO, 0, ethscriptions()).unwrap();
        assert!(!tx.data.is_empty());
    }
}
