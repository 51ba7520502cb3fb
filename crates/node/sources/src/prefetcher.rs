//! Bounded concurrent pipeline that hides L1 latency by fetching a sliding
//! window of future L1 blocks ahead of the block the derivation loop is
//! currently driving.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use dashmap::DashMap;
use ethd_genesis::NetworkConfig;
use ethd_protocol::{L1Block, Operation};
use tokio::sync::{Mutex, OnceCell, Semaphore};

use crate::{L1Client, SourceError};

/// Default width of the prefetch window, in L1 blocks.
pub const DEFAULT_PREFETCH_FORWARD: u64 = 20;
/// Default number of concurrent fetch workers.
pub const DEFAULT_PREFETCH_THREADS: usize = 2;

/// Everything the derivation loop needs for one L1 block: the block itself
/// and the classified operations of every transaction, carrying the
/// per-block index used for deposit source-hash derivation.
#[derive(Debug, Clone)]
pub struct BlockBundle {
    /// The fetched L1 block.
    pub l1_block: L1Block,
    /// Classified operations, paired with a running index unique within the
    /// block (used as the `log_or_tx_index` component of the source hash).
    pub operations: Vec<(Operation, u64)>,
}

/// The result of resolving a promise for a given L1 block number.
#[derive(Debug, Clone)]
enum FetchOutcome {
    Ready(BlockBundle),
    NotReady,
}

type Promise = Arc<OnceCell<Result<FetchOutcome, String>>>;

/// What `fetch` returns for a requested L1 block.
#[derive(Debug, Clone)]
pub enum PrefetchResult {
    /// The block and its classified operations.
    Ready(BlockBundle),
    /// The block has not been mined yet.
    NotReady,
}

/// Concurrently fetches and classifies a sliding window of L1 blocks.
#[derive(Debug)]
pub struct Prefetcher {
    client: L1Client,
    config: Arc<NetworkConfig>,
    promises: DashMap<u64, Promise>,
    permits: Arc<Semaphore>,
    ahead: u64,
    fetch_timeout: Duration,
    chain_tip_cache: Mutex<Option<(Instant, u64)>>,
}

impl Prefetcher {
    /// Builds a prefetcher fetching from `client`, classifying with `config`,
    /// looking `ahead` blocks past the cursor with `threads` concurrent
    /// workers.
    pub fn new(client: L1Client, config: Arc<NetworkConfig>, ahead: u64, threads: usize) -> Self {
        Self {
            client,
            config,
            promises: DashMap::new(),
            permits: Arc::new(Semaphore::new(threads.max(1))),
            ahead,
            fetch_timeout: Duration::from_secs(30),
            chain_tip_cache: Mutex::new(None),
        }
    }

    /// Overrides the default 30s fetch timeout; tests use a short one.
    pub const fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Loosely-cached chain tip, refreshed at most every 12 seconds.
    async fn chain_tip(&self) -> Result<u64, SourceError> {
        let mut cache = self.chain_tip_cache.lock().await;
        if let Some((fetched_at, tip)) = *cache {
            if fetched_at.elapsed() < Duration::from_secs(12) {
                return Ok(tip);
            }
        }
        let tip = self.client.chain_tip().await?;
        *cache = Some((Instant::now(), tip));
        Ok(tip)
    }

    /// Schedules fetch tasks for every block in `from..min(from + ahead, chain_tip)`
    /// not already tracked by the promise map.
    pub async fn ensure_prefetched(&self, from: u64) -> Result<(), SourceError> {
        let tip = self.chain_tip().await?;
        let window_end = (from + self.ahead).min(tip.saturating_add(1));

        for n in from..window_end {
            if self.promises.contains_key(&n) {
                continue;
            }
            let promise: Promise = Arc::new(OnceCell::new());
            self.promises.insert(n, promise.clone());
            self.spawn_worker(n, promise);
        }

        Ok(())
    }

    fn spawn_worker(&self, n: u64, promise: Promise) {
        let client = self.client.clone();
        let config = self.config.clone();
        let permits = self.permits.clone();

        tokio::spawn(async move {
            let _ = promise
                .get_or_init(|| async move {
                    let _permit = permits.acquire_owned().await.expect("semaphore never closed");
                    resolve(&client, &config, n).await
                })
                .await;
        });
    }

    /// Returns the bundle for L1 block `n`, blocking (up to the configured
    /// timeout) until the underlying promise resolves. A not-yet-mined block
    /// evicts its promise so a later call retries.
    pub async fn fetch(&self, n: u64) -> Result<PrefetchResult, SourceError> {
        let promise = self
            .promises
            .entry(n)
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        if promise.get().is_none() {
            self.spawn_worker(n, promise.clone());
        }

        let outcome = tokio::time::timeout(self.fetch_timeout, promise.get_or_init(|| async {
            resolve(&self.client, &self.config, n).await
        }))
        .await
        .map_err(|_| SourceError::Timeout)?
        .clone();

        match outcome {
            Ok(FetchOutcome::Ready(bundle)) => Ok(PrefetchResult::Ready(bundle)),
            Ok(FetchOutcome::NotReady) => {
                self.promises.remove(&n);
                Ok(PrefetchResult::NotReady)
            }
            Err(message) => {
                self.promises.remove(&n);
                Err(SourceError::Rpc(message))
            }
        }
    }

    /// Drops completed entries below `min_keep`; in-flight promises are left
    /// alone regardless of their block number.
    pub fn clear_older_than(&self, min_keep: u64) {
        self.promises.retain(|&n, promise| n >= min_keep || promise.get().is_none());
    }
}

async fn resolve(
    client: &L1Client,
    config: &NetworkConfig,
    n: u64,
) -> Result<FetchOutcome, String> {
    let block = client.fetch_block(n).await.map_err(|e| e.to_string())?;
    let Some(l1_block) = block else { return Ok(FetchOutcome::NotReady) };

    let mut operations = Vec::new();
    for tx in &l1_block.transactions {
        for op in ethd_detector::detect(tx, config, l1_block.number) {
            let index = operations.len() as u64;
            operations.push((op, index));
        }
    }

    Ok(FetchOutcome::Ready(BlockBundle { l1_block, operations }))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::*;

    #[test]
    fn clear_older_than_keeps_in_flight_promises() {
        let promises: DashMap<u64, Promise> = DashMap::new();
        promises.insert(1, Arc::new(OnceCell::new()));
        let completed = Arc::new(OnceCell::new());
        completed.set(Ok(FetchOutcome::NotReady)).unwrap();
        promises.insert(2, completed);

        promises.retain(|&n, promise| n >= 3 || promise.get().is_none());

        assert!(promises.contains_key(&1));
        assert!(!promises.contains_key(&2));
    }

    #[tokio::test]
    async fn fetch_of_an_unscheduled_block_still_resolves() {
        // Covers the case where `fetch` races ahead of `ensure_prefetched`.
        static CALLS: AtomicU64 = AtomicU64::new(0);
        let cell: Promise = Arc::new(OnceCell::new());
        let result = cell
            .get_or_init(|| async {
                CALLS.fetch_add(1, Ordering::SeqCst);
                Ok(FetchOutcome::NotReady)
            })
            .await
            .clone();
        assert!(matches!(result, Ok(FetchOutcome::NotReady)));
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }
}
