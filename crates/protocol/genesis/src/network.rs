//! Network identity and the configuration bundle derived from it.

use core::str::FromStr;

use alloy_chains::Chain;
use alloy_primitives::address;

use crate::{Esip, EsipSchedule, SystemAddresses};

/// L2 block time, in seconds, shared by every network.
pub const L2_BLOCK_TIME: u64 = 12;

/// L2 block gas limit, shared by every network.
pub const L2_BLOCK_GAS_LIMIT: u64 = 10_000_000_000;

/// The Optimism-style deposit transaction type byte.
pub const DEPOSIT_TX_TYPE: u8 = 0x7d;

/// A known Ethscriptions L2 network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Network {
    /// Ethereum mainnet.
    Mainnet,
    /// Sepolia testnet.
    Sepolia,
    /// Hoodi testnet.
    Hoodi,
}

/// An error parsing or constructing a [`NetworkConfig`].
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// `L1_NETWORK` did not match any known preset.
    #[error("unknown network: {0}")]
    UnknownNetwork(alloc::string::String),
}

impl FromStr for Network {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Self::Mainnet),
            "sepolia" => Ok(Self::Sepolia),
            "hoodi" => Ok(Self::Hoodi),
            other => Err(NetworkError::UnknownNetwork(other.into())),
        }
    }
}

/// The full set of chain parameters the derivation pipeline needs for one network.
///
/// Constructed once at process start (via [`NetworkConfig::for_network`] or a registry
/// preset) and passed by reference into every component; never re-derived mid-run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkConfig {
    /// Identifies which preset this configuration was built from.
    pub network: Network,
    /// The L1 chain id.
    pub l1_chain_id: Chain,
    /// The L2 chain id.
    pub l2_chain_id: Chain,
    /// The L1 block number whose post-state seeds L2 genesis. L2 block 1 is derived
    /// from L1 block `l2_genesis_l1_block + 1`.
    pub l2_genesis_l1_block: u64,
    /// L2 block time in seconds.
    pub l2_block_time: u64,
    /// L2 block gas limit.
    pub l2_block_gas_limit: u64,
    /// Predeploy addresses on L2.
    pub addresses: SystemAddresses,
    /// The ESIP activation schedule for this network.
    pub esips: EsipSchedule,
}

impl NetworkConfig {
    /// Builds the configuration for a known network preset.
    ///
    /// `ethscriptions_address` and `l2_genesis_l1_block` are operator-provided: the
    /// predeploy is not baked into a chain spec the way the L1-attributes predeploy is,
    /// and the genesis anchor block is chosen per deployment.
    pub fn for_network(
        network: Network,
        ethscriptions_address: alloy_primitives::Address,
        l2_genesis_l1_block: u64,
    ) -> Self {
        let (l1_chain_id, l2_chain_id, esips) = match network {
            Network::Mainnet => (Chain::mainnet(), Chain::from_id(0xeeee), EsipSchedule::MAINNET),
            Network::Sepolia => {
                (Chain::sepolia(), Chain::from_id(0xeeeea), EsipSchedule::ALL_ACTIVE)
            }
            Network::Hoodi => (Chain::from_id(560048), Chain::from_id(0xeeeeb), EsipSchedule::ALL_ACTIVE),
        };
        Self {
            network,
            l1_chain_id,
            l2_chain_id,
            l2_genesis_l1_block,
            l2_block_time: L2_BLOCK_TIME,
            l2_block_gas_limit: L2_BLOCK_GAS_LIMIT,
            addresses: SystemAddresses {
                ethscriptions: ethscriptions_address,
                ..SystemAddresses::default()
            },
            esips,
        }
    }

    /// The L1 block number that produces L2 block 1.
    pub const fn l2_block_one_l1_block(&self) -> u64 {
        self.l2_genesis_l1_block + 1
    }

    /// Returns true if `esip` is active at `l1_block_number` on this network.
    pub const fn is_esip_active(&self, esip: Esip, l1_block_number: u64) -> bool {
        self.esips.is_active(esip, l1_block_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_networks() {
        assert_eq!("mainnet".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!("sepolia".parse::<Network>().unwrap(), Network::Sepolia);
        assert_eq!("hoodi".parse::<Network>().unwrap(), Network::Hoodi);
        assert!("arbitrum".parse::<Network>().is_err());
    }

    #[test]
    fn mainnet_preset_uses_mainnet_esip_schedule() {
        let cfg = NetworkConfig::for_network(Network::Mainnet, address!("0x1111111111111111111111111111111111111111"), 17_000_000);
        assert_eq!(cfg.l2_chain_id.id(), 0xeeee);
        assert!(!cfg.is_esip_active(Esip::Esip1, 0));
        assert!(cfg.is_esip_active(Esip::Esip1, 17_672_762));
        assert_eq!(cfg.l2_block_one_l1_block(), 17_000_001);
    }

    #[test]
    fn testnets_enable_every_esip_from_genesis() {
        let cfg = NetworkConfig::for_network(Network::Sepolia, address!("0x1111111111111111111111111111111111111111"), 0);
        assert!(cfg.is_esip_active(Esip::Esip7, 0));
    }
}
