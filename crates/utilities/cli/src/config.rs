//! Environment-variable-driven configuration shared by every `ethd-node`
//! subcommand, parsed with `clap`'s `env` derive feature.

use std::sync::Arc;

use alloy_primitives::Address;
use clap::Args;
use derive_more::Debug;
use ethd_genesis::{Network, NetworkConfig};

/// Network selection and RPC/Engine endpoints, recognized as both CLI flags
/// and the environment variables named in each `env` attribute.
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Selects chain ids and the ESIP activation schedule.
    #[arg(long, env = "L1_NETWORK", default_value = "mainnet")]
    pub l1_network: Network,

    /// L1 block whose post-state seeds L2 genesis; `None` uses the network's
    /// registry preset.
    #[arg(long, env = "L1_GENESIS_BLOCK")]
    pub l1_genesis_block: Option<u64>,

    /// The Ethscriptions contract's L2 address; `None` uses the network's
    /// registry preset.
    #[arg(long, env = "ETHSCRIPTIONS_ADDRESS")]
    pub ethscriptions_address: Option<Address>,

    /// L1 execution client JSON-RPC endpoint.
    #[arg(long, env = "L1_RPC_URL")]
    pub l1_rpc_url: url::Url,

    /// L2 execution client's authenticated Engine API endpoint.
    #[arg(long, env = "GETH_RPC_URL")]
    pub geth_rpc_url: url::Url,

    /// L2 execution client's non-authenticated JSON-RPC endpoint.
    #[arg(long, env = "NON_AUTH_GETH_RPC_URL")]
    pub non_auth_geth_rpc_url: url::Url,

    /// 64 hex character (32 byte) Engine API JWT secret.
    #[debug("[redacted]")]
    #[arg(long, env = "JWT_SECRET")]
    pub jwt_secret: String,

    /// Number of L1 blocks imported per tick.
    #[arg(long, env = "BLOCK_IMPORT_BATCH_SIZE", default_value_t = 2)]
    pub block_import_batch_size: u64,

    /// Seconds slept between ticks in the `import` loop.
    #[arg(long, env = "IMPORT_INTERVAL", default_value_t = 6)]
    pub import_interval_secs: u64,

    /// Runs the validator after every tick.
    #[arg(long, env = "VALIDATE_IMPORT", default_value_t = false)]
    pub validate_import: bool,

    /// Base URL of the reference Ethscriptions indexer, required when
    /// `validate_import` is set.
    #[arg(long, env = "ETHSCRIPTIONS_API_BASE_URL")]
    pub ethscriptions_api_base_url: Option<url::Url>,

    /// Width of the L1 prefetch window, in blocks.
    #[arg(long, env = "L1_PREFETCH_FORWARD", default_value_t = ethd_sources::DEFAULT_PREFETCH_FORWARD)]
    pub l1_prefetch_forward: u64,

    /// Number of concurrent prefetch workers.
    #[arg(long, env = "L1_PREFETCH_THREADS", default_value_t = ethd_sources::DEFAULT_PREFETCH_THREADS)]
    pub l1_prefetch_threads: usize,
}

impl Config {
    /// Resolves the network preset, applying any operator overrides.
    pub fn network_config(&self) -> Arc<NetworkConfig> {
        let mut config = ethd_registry::preset(self.l1_network);
        if let Some(address) = self.ethscriptions_address {
            config.addresses.ethscriptions = address;
        }
        if let Some(block) = self.l1_genesis_block {
            config.l2_genesis_l1_block = block;
        }
        Arc::new(config)
    }
}
