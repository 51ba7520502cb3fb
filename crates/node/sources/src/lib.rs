//! L1/L2 RPC clients and the bounded-lookahead L1 prefetcher.

mod error;
mod l1_client;
mod l2_client;
mod prefetcher;

pub use error::SourceError;
pub use l1_client::L1Client;
pub use l2_client::L2Client;
pub use prefetcher::{
    BlockBundle, DEFAULT_PREFETCH_FORWARD, DEFAULT_PREFETCH_THREADS, PrefetchResult, Prefetcher,
};
