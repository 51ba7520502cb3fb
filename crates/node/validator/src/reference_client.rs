//! HTTP client for the independent reference Ethscriptions indexer, used to
//! cross-check the derivation pipeline's own output.

use std::time::Duration;

use alloy_primitives::{Address, B256};
use backon::{ExponentialBuilder, Retryable};
use ethd_detector::DataUri;
use ethd_protocol::{ExpectedBlockData, ExpectedCreation, ExpectedTransfer};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use url::Url;

use crate::error::ReferenceApiError;

const PAGE_SIZE: u32 = 50;

#[derive(Debug, Deserialize)]
struct Pagination {
    has_more: bool,
    page_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Page<T> {
    result: Vec<T>,
    pagination: Pagination,
}

#[derive(Debug, Deserialize)]
struct RawCreation {
    transaction_hash: B256,
    creator: Address,
    initial_owner: Address,
    content_uri: String,
    #[serde(default)]
    esip6: bool,
}

#[derive(Debug, Deserialize)]
struct RawTransfer {
    ethscription_number: u64,
    from_address: Address,
    to_address: Address,
}

/// Fetches expected creations/transfers for a given L1 block from the
/// reference indexer.
#[derive(Debug, Clone)]
pub struct ReferenceApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ReferenceApiClient {
    /// Builds a client against `base_url`.
    pub fn new(base_url: Url) -> Self {
        Self { http: reqwest::Client::new(), base_url }
    }

    fn backoff() -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(500))
            .with_max_delay(Duration::from_secs(4))
            .with_max_times(3)
            .with_jitter()
    }

    /// Fetches every expected creation and transfer for `l1_block_number`,
    /// following pagination until `has_more` is false.
    pub async fn fetch_block_data(
        &self,
        l1_block_number: u64,
    ) -> Result<ExpectedBlockData, ReferenceApiError> {
        let creations = self
            .fetch_all::<RawCreation>("ethscriptions", l1_block_number)
            .await?
            .into_iter()
            .map(|raw| {
                let parsed = DataUri::parse(&raw.content_uri);
                let (mimetype, media_type, mime_subtype, content_sha) = match &parsed {
                    Some(uri) => (
                        uri.mimetype.clone(),
                        uri.media_type.clone(),
                        uri.mime_subtype.clone(),
                        sha256_of(&uri.payload),
                    ),
                    None => (String::new(), String::new(), String::new(), sha256_of(b"")),
                };

                ExpectedCreation {
                    tx_hash: raw.transaction_hash,
                    creator: raw.creator,
                    initial_owner: raw.initial_owner,
                    content_uri: raw.content_uri,
                    content_sha,
                    mimetype,
                    media_type,
                    mime_subtype,
                    esip6: raw.esip6,
                }
            })
            .collect();

        let transfers = self
            .fetch_all::<RawTransfer>("ethscription_transfers", l1_block_number)
            .await?
            .into_iter()
            .map(|raw| ExpectedTransfer {
                token_id: raw.ethscription_number,
                from: raw.from_address,
                to: raw.to_address,
            })
            .collect();

        Ok(ExpectedBlockData { l1_block_number, creations, transfers })
    }

    async fn fetch_all<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        l1_block_number: u64,
    ) -> Result<Vec<T>, ReferenceApiError> {
        let mut items = Vec::new();
        let mut page_key: Option<String> = None;

        loop {
            let mut url = self.base_url.join(path).map_err(|e| ReferenceApiError::Request(e.to_string()))?;
            {
                let mut query = url.query_pairs_mut();
                query.append_pair("block_number", &l1_block_number.to_string());
                query.append_pair("max_results", &PAGE_SIZE.to_string());
                if let Some(key) = &page_key {
                    query.append_pair("page_key", key);
                }
            }

            let page: Page<T> = (|| async {
                self.http.get(url.clone()).send().await?.error_for_status()?.json::<Page<T>>().await
            })
            .retry(Self::backoff())
            .await
            .map_err(|e| ReferenceApiError::Request(e.to_string()))?;

            items.extend(page.result);

            if !page.pagination.has_more {
                break;
            }
            page_key = page.pagination.page_key;
            if page_key.is_none() {
                break;
            }
        }

        Ok(items)
    }
}

fn sha256_of(bytes: &[u8]) -> B256 {
    let digest = Sha256::digest(bytes);
    B256::from_slice(&digest)
}
