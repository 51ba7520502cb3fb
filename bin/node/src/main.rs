//! Derives the Ethscriptions L2 chain from L1, block by block, through the
//! Engine API — optionally cross-checking every derived L1 block against the
//! independent reference indexer.

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use ethd_cli::{Config, LoggingConfig};
#[cfg(feature = "metrics")]
use ethd_cli::MetricsConfig;
use ethd_engine::{EngineClient, Proposer};
use ethd_node_service::{Driver, TickOutcome};
use ethd_protocol::HeadCache;
use ethd_sources::{L1Client, L2Client, Prefetcher};
use ethd_storage::{BlockTag, StorageReader};
use ethd_validator::{ReferenceApiClient, Validator};

/// Ethscriptions derivation node.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(flatten)]
    logging: LoggingConfig,

    #[cfg(feature = "metrics")]
    #[command(flatten)]
    metrics: MetricsConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Loops ticks, deriving L1 blocks from `--from-l1-block` (or the L2
    /// genesis block) up to and past the L1 chain tip.
    Import {
        /// L1 block to start deriving from. Defaults to `L1_GENESIS_BLOCK + 1`,
        /// the block that produces L2 block 1.
        #[arg(long)]
        from_l1_block: Option<u64>,
    },
    /// Derives exactly one L1 block and exits.
    ImportBlock {
        /// The L1 block number to derive.
        l1_block: u64,
    },
    /// Cross-checks a previously-derived L1 block against the reference
    /// indexer, without deriving anything.
    ValidateBlock {
        /// The L1 block number to validate.
        l1_block: u64,
        /// The L2 block numbers it produced, in order.
        #[arg(long = "l2-block", required = true, num_args = 1..)]
        l2_blocks: Vec<u64>,
    },
    /// Prints the resolved network configuration used to seed L2 genesis.
    Genesis,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.logging.init();
    #[cfg(feature = "metrics")]
    cli.metrics.init().context("failed to start the metrics exporter")?;

    let network = cli.config.network_config();

    match cli.command {
        Command::Genesis => {
            print_genesis(&network);
            Ok(())
        }
        Command::ImportBlock { l1_block } => {
            let mut driver = build_driver(&cli.config, &network, l1_block).await?;
            run_tick(&mut driver).await
        }
        Command::Import { from_l1_block } => {
            let start = from_l1_block.unwrap_or(network.l2_genesis_l1_block + 1);
            let mut driver = build_driver(&cli.config, &network, start).await?;
            loop {
                run_tick(&mut driver).await?;
                tokio::time::sleep(Duration::from_secs(cli.config.import_interval_secs)).await;
            }
        }
        Command::ValidateBlock { l1_block, l2_blocks } => {
            let validator = build_validator(&cli.config, &network)
                .context("VALIDATE_IMPORT requires ETHSCRIPTIONS_API_BASE_URL")?;
            let l2 = L2Client::new(cli.config.non_auth_geth_rpc_url.clone());
            let (_, head_hash, _) = l2.head().await.context("failed to read L2 head")?;
            let result = validator.validate(l1_block, &l2_blocks, BlockTag::Hash(head_hash)).await;
            print_validation(&result);
            if !result.success && !result.api_unavailable {
                bail!("validation failed for L1 block {l1_block}");
            }
            Ok(())
        }
    }
}

async fn run_tick(driver: &mut Driver) -> Result<()> {
    match driver.tick().await? {
        TickOutcome::NotReady => {
            tracing::debug!(l1_block = driver.next_l1_block(), "L1 block not yet mined");
        }
        TickOutcome::Produced { l2_block_hashes, validation } => {
            if let Some(result) = &validation {
                print_validation(result);
                if !result.success && !result.api_unavailable {
                    bail!("validation failed for L1 block {}", result.l1_block_number);
                }
            }
            tracing::info!(l2_blocks = l2_block_hashes.len(), "derived L1 block");
        }
    }
    Ok(())
}

async fn build_driver(
    config: &Config,
    network: &Arc<ethd_genesis::NetworkConfig>,
    next_l1_block: u64,
) -> Result<Driver> {
    let l1 = L1Client::new(config.l1_rpc_url.clone());
    let l2 = L2Client::new(config.non_auth_geth_rpc_url.clone());
    let engine = EngineClient::new(config.geth_rpc_url.clone(), &config.jwt_secret)
        .context("failed to build the Engine API client")?;

    let prefetcher = Prefetcher::new(l1, network.clone(), config.l1_prefetch_forward, config.l1_prefetch_threads);
    let proposer = Proposer::new(engine, network);
    let validator = build_validator(config, network);

    let (head_number, head_hash, head_timestamp) = l2.head().await.context("failed to read L2 head")?;
    let head = HeadCache::at(head_hash);

    Ok(Driver::new(
        prefetcher,
        proposer,
        validator,
        network.clone(),
        head,
        head_timestamp,
        next_l1_block,
        head_number + 1,
    ))
}

fn build_validator(config: &Config, network: &Arc<ethd_genesis::NetworkConfig>) -> Option<Validator> {
    if !config.validate_import {
        return None;
    }
    let base_url = config.ethscriptions_api_base_url.clone()?;
    let l2 = L2Client::new(config.non_auth_geth_rpc_url.clone());
    let storage = StorageReader::new(l2.clone(), network.addresses.ethscriptions);
    let reference = ReferenceApiClient::new(base_url);
    Some(Validator::new(reference, l2, storage, network.clone()))
}

fn print_genesis(network: &ethd_genesis::NetworkConfig) {
    #[derive(serde::Serialize)]
    struct GenesisInfo<'a> {
        network: &'a str,
        l1_chain_id: u64,
        l2_chain_id: u64,
        l2_genesis_l1_block: u64,
        l2_block_time: u64,
        ethscriptions_address: alloy_primitives::Address,
        l1_attributes_address: alloy_primitives::Address,
    }

    let info = GenesisInfo {
        network: network_name(network.network),
        l1_chain_id: network.l1_chain_id,
        l2_chain_id: network.l2_chain_id,
        l2_genesis_l1_block: network.l2_genesis_l1_block,
        l2_block_time: network.l2_block_time,
        ethscriptions_address: network.addresses.ethscriptions,
        l1_attributes_address: network.addresses.l1_attributes,
    };

    match serde_json::to_string_pretty(&info) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!(error = %e, "failed to serialize genesis info"),
    }
}

const fn network_name(network: ethd_genesis::Network) -> &'static str {
    match network {
        ethd_genesis::Network::Mainnet => "mainnet",
        ethd_genesis::Network::Sepolia => "sepolia",
        ethd_genesis::Network::Hoodi => "hoodi",
    }
}

fn print_validation(result: &ethd_protocol::ValidationResult) {
    match serde_json::to_string(result) {
        Ok(json) => println!("{json}"),
        Err(_) => println!("{result:?}"),
    }
}
