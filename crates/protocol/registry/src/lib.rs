//! A registry of known Ethscriptions network configurations.
//!
//! Mirrors the superchain-registry pattern: a static table of presets keyed by L2
//! chain id, built once and exposed through [`lazy_static`] so callers never pay the
//! construction cost more than once per process.

use alloy_primitives::{address, map::HashMap};
use ethd_genesis::{Network, NetworkConfig};
use lazy_static::lazy_static;

/// The predeploy address used by every preset in this registry.
///
/// Operators deploying a fresh network should construct [`NetworkConfig`] directly
/// rather than relying on a preset, since the real deployment address is chosen at
/// contract-deploy time.
pub const DEFAULT_ETHSCRIPTIONS_ADDRESS: alloy_primitives::Address =
    address!("0x2222222222222222222222222222222222222222");

/// The L1 genesis anchor block used by the mainnet preset.
pub const MAINNET_L1_GENESIS_BLOCK: u64 = 17_478_950;

lazy_static! {
    /// Known network presets, keyed by L2 chain id.
    pub static ref PRESETS: HashMap<u64, NetworkConfig> = {
        let mut map = HashMap::default();
        let mainnet = NetworkConfig::for_network(
            Network::Mainnet,
            DEFAULT_ETHSCRIPTIONS_ADDRESS,
            MAINNET_L1_GENESIS_BLOCK,
        );
        let sepolia = NetworkConfig::for_network(Network::Sepolia, DEFAULT_ETHSCRIPTIONS_ADDRESS, 0);
        let hoodi = NetworkConfig::for_network(Network::Hoodi, DEFAULT_ETHSCRIPTIONS_ADDRESS, 0);
        map.insert(mainnet.l2_chain_id.id(), mainnet);
        map.insert(sepolia.l2_chain_id.id(), sepolia);
        map.insert(hoodi.l2_chain_id.id(), hoodi);
        map
    };
}

/// Looks up the preset for `network`.
pub fn preset(network: Network) -> NetworkConfig {
    match network {
        Network::Mainnet => {
            NetworkConfig::for_network(Network::Mainnet, DEFAULT_ETHSCRIPTIONS_ADDRESS, MAINNET_L1_GENESIS_BLOCK)
        }
        Network::Sepolia => NetworkConfig::for_network(Network::Sepolia, DEFAULT_ETHSCRIPTIONS_ADDRESS, 0),
        Network::Hoodi => NetworkConfig::for_network(Network::Hoodi, DEFAULT_ETHSCRIPTIONS_ADDRESS, 0),
    }
}

/// Looks up a preset by its L2 chain id.
pub fn by_l2_chain_id(chain_id: u64) -> Option<&'static NetworkConfig> {
    PRESETS.get(&chain_id)
}

#[cfg(feature = "tabled")]
mod table;
#[cfg(feature = "tabled")]
pub use table::print_presets;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_keyed_by_l2_chain_id() {
        assert!(by_l2_chain_id(0xeeee).is_some());
        assert!(by_l2_chain_id(0xeeeea).is_some());
        assert!(by_l2_chain_id(1).is_none());
    }

    #[test]
    fn mainnet_preset_carries_the_mainnet_genesis_anchor() {
        let cfg = preset(Network::Mainnet);
        assert_eq!(cfg.l2_genesis_l1_block, MAINNET_L1_GENESIS_BLOCK);
    }
}
