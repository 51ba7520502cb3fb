//! Predeploy addresses carried by every network configuration.

use alloy_primitives::{Address, address};

/// The L1 attributes predeploy, shared with the OP Stack convention.
pub const L1_ATTRIBUTES_PREDEPLOY: Address = address!("0x4200000000000000000000000000000000000015");

/// Addresses of the L2 predeploys the derivation pipeline writes to or reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemAddresses {
    /// The Ethscriptions protocol contract. The builder targets this address with every
    /// operation-derived deposit; the storage reader and event decoder read from it.
    pub ethscriptions: Address,
    /// The L1-attributes predeploy, carrying L1 block metadata into every L2 block.
    pub l1_attributes: Address,
}

impl Default for SystemAddresses {
    fn default() -> Self {
        Self {
            ethscriptions: Address::ZERO,
            l1_attributes: L1_ATTRIBUTES_PREDEPLOY,
        }
    }
}
