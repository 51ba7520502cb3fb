//! Genesis ethscriptions: creations that exist in L2 state from block 1
//! onward rather than having been derived from an L1 transaction. At the L1
//! block that produces L2 block 1, these augment the reference API's
//! expected creation set instead of being treated as a divergence.

use std::sync::OnceLock;

use ethd_protocol::ExpectedCreation;
use serde::Deserialize;

const GENESIS_ETHSCRIPTIONS_JSON: &str = include_str!("../assets/genesis_ethscriptions.json");

#[derive(Deserialize)]
struct RawGenesisCreation {
    transaction_hash: alloy_primitives::B256,
    creator: alloy_primitives::Address,
    initial_owner: alloy_primitives::Address,
    content_uri: String,
}

static GENESIS_CREATIONS: OnceLock<Vec<ExpectedCreation>> = OnceLock::new();

/// The fixed set of genesis ethscriptions, parsed once from the bundled
/// asset file.
pub fn genesis_creations() -> &'static [ExpectedCreation] {
    GENESIS_CREATIONS.get_or_init(|| {
        let raw: Vec<RawGenesisCreation> =
            serde_json::from_str(GENESIS_ETHSCRIPTIONS_JSON).expect("genesis ethscriptions asset is valid json");

        raw.into_iter()
            .map(|entry| {
                let parsed = ethd_detector::DataUri::parse(&entry.content_uri);
                let (mimetype, media_type, mime_subtype, content_sha) = match &parsed {
                    Some(uri) => (
                        uri.mimetype.clone(),
                        uri.media_type.clone(),
                        uri.mime_subtype.clone(),
                        sha256(&uri.payload),
                    ),
                    None => (String::new(), String::new(), String::new(), sha256(b"")),
                };

                ExpectedCreation {
                    tx_hash: entry.transaction_hash,
                    creator: entry.creator,
                    initial_owner: entry.initial_owner,
                    content_uri: entry.content_uri,
                    content_sha,
                    mimetype,
                    media_type,
                    mime_subtype,
                    esip6: false,
                }
            })
            .collect()
    })
}

fn sha256(bytes: &[u8]) -> alloy_primitives::B256 {
    use sha2::{Digest, Sha256};
    alloy_primitives::B256::from_slice(&Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_bundled_asset_without_panicking() {
        let _ = genesis_creations();
    }
}
