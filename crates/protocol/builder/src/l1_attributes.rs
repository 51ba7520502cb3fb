//! Encodes the per-block L1-attributes system deposit.
//!
//! The predeploy's `setL1BlockValuesEcotone()` takes a tightly packed argument
//! list rather than standard ABI tuple encoding, so this is hand-rolled
//! instead of going through `alloy_sol_types`.

use alloy_primitives::{Address, Bytes};
use ethd_genesis::SystemAddresses;
use ethd_protocol::{DepositTransaction, L1AttributesDeposit, L1_INFO_DEPOSIT_SOURCE_DOMAIN};

use crate::source_hash;

/// `setL1BlockValuesEcotone()`, the Ecotone-era L1 attributes setter selector.
const SET_L1_BLOCK_VALUES_ECOTONE_SELECTOR: [u8; 4] = [0x44, 0x0a, 0x5e, 0x20];

const DEPOSITOR_ACCOUNT: Address = Address::new([
    0xde, 0xad, 0xde, 0xad, 0xde, 0xad, 0xde, 0xad, 0xde, 0xad, 0xde, 0xad, 0xde, 0xad, 0xde, 0xad,
    0x00, 0x01, 0x00, 0x01,
]);

fn encode_call_data(attrs: &L1AttributesDeposit) -> Bytes {
    let mut out = Vec::with_capacity(4 + 4 + 4 + 8 + 8 + 8 + 32 + 32 + 32 + 32);
    out.extend_from_slice(&SET_L1_BLOCK_VALUES_ECOTONE_SELECTOR);
    out.extend_from_slice(&attrs.base_fee_scalar.to_be_bytes());
    out.extend_from_slice(&attrs.blob_base_fee_scalar.to_be_bytes());
    out.extend_from_slice(&attrs.sequence_number.to_be_bytes());
    out.extend_from_slice(&attrs.timestamp.to_be_bytes());
    out.extend_from_slice(&attrs.number.to_be_bytes());
    out.extend_from_slice(&attrs.base_fee.to_be_bytes::<32>());
    out.extend_from_slice(&attrs.blob_base_fee.to_be_bytes::<32>());
    out.extend_from_slice(attrs.block_hash.as_slice());
    out.extend_from_slice(attrs.batcher_hash.as_slice());
    Bytes::from(out)
}

/// Builds the L1-attributes deposit for one L2 block, always the first
/// transaction in the block.
pub fn build(attrs: &L1AttributesDeposit, addresses: &SystemAddresses) -> DepositTransaction {
    let source_hash = source_hash::l1_info_deposit(attrs.block_hash, attrs.sequence_number);
    DepositTransaction {
        source_hash,
        from: DEPOSITOR_ACCOUNT,
        to: Some(addresses.l1_attributes),
        mint: alloy_primitives::U256::ZERO,
        value: alloy_primitives::U256::ZERO,
        gas: 150_000,
        is_system_tx: false,
        data: encode_call_data(attrs),
    }
}

/// `true` if `source_hash` was derived with the L1-info domain, i.e. this is
/// the L1-attributes deposit rather than a user deposit.
pub const fn is_l1_info_domain(domain: u64) -> bool {
    domain == L1_INFO_DEPOSIT_SOURCE_DOMAIN
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{B256, U256};

    use super::*;

    fn sample_attrs() -> L1AttributesDeposit {
        L1AttributesDeposit {
            number: 100,
            timestamp: 1_700_000_000,
            base_fee: U256::from(10u64),
            blob_base_fee: U256::from(1u64),
            block_hash: B256::repeat_byte(0xaa),
            batcher_hash: B256::repeat_byte(0xbb),
            sequence_number: 0,
            base_fee_scalar: 1368,
            blob_base_fee_scalar: 810_949,
        }
    }

    #[test]
    fn call_data_starts_with_the_ecotone_selector() {
        let data = encode_call_data(&sample_attrs());
        assert_eq!(&data[..4], &SET_L1_BLOCK_VALUES_ECOTONE_SELECTOR);
    }

    #[test]
    fn deposit_uses_the_depositor_account_and_predeploy_recipient() {
        let addresses = SystemAddresses::default();
        let tx = build(&sample_attrs(), &addresses);
        assert_eq!(tx.from, DEPOSITOR_ACCOUNT);
        assert_eq!(tx.to, Some(addresses.l1_attributes));
        assert!(!tx.is_system_tx);
    }
}
