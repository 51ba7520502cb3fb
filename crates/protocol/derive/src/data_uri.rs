//! RFC 2397 data-URI parsing for the create-from-input rule.

use alloy_primitives::Bytes;
use base64::Engine as _;
use ethd_protocol::{L1Transaction, Operation, TokenParams};

use crate::token_params;

/// A parsed `data:[<mediatype>][;base64],<data>` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// The media type, e.g. `"image"`; empty for `data:,...`.
    pub media_type: String,
    /// The mime subtype, e.g. `"png"`; empty for `data:,...`.
    pub mime_subtype: String,
    /// Mediatype parameters, e.g. `["base64".into()]` is excluded; holds the rest,
    /// such as `"rule=esip6"`.
    pub params: Vec<String>,
    /// Whether the `;base64` extension was present.
    pub is_base64: bool,
    /// The decoded payload bytes.
    pub payload: Bytes,
    /// The full mediatype string as it appeared before the comma, excluding
    /// `;base64`. Used to round-trip `mimetype` into the builder.
    pub mimetype: String,
}

impl DataUri {
    /// Parses `input` as a data URI, returning `None` if it is not well-formed:
    /// missing the `data:` scheme, missing the comma separator, or declaring
    /// `;base64` over a payload that does not decode.
    pub fn parse(input: &str) -> Option<Self> {
        let rest = input.strip_prefix("data:")?;
        let (meta, data_part) = rest.split_once(',')?;

        let (mimetype, is_base64) = match meta.strip_suffix(";base64") {
            Some(stripped) => (stripped.to_owned(), true),
            None => (meta.to_owned(), false),
        };

        let mut parts = mimetype.split(';');
        let type_part = parts.next().unwrap_or_default();
        let params: Vec<String> = parts.map(|p| p.to_owned()).collect();

        let (media_type, mime_subtype) = if type_part.is_empty() {
            (String::new(), String::new())
        } else {
            match type_part.split_once('/') {
                Some((m, s)) => (m.to_owned(), s.to_owned()),
                None => return None,
            }
        };

        let payload = if is_base64 {
            let decoded = base64::engine::general_purpose::STANDARD.decode(data_part).ok()?;
            Bytes::from(decoded)
        } else {
            Bytes::from(percent_decode(data_part))
        };

        Some(Self { media_type, mime_subtype, params, is_base64, payload, mimetype })
    }

    /// True if a `rule=esip6` mediatype parameter is present.
    pub fn has_esip6_rule(&self) -> bool {
        self.params.iter().any(|p| p == "rule=esip6")
    }
}

/// Runs the create-from-input rule against `tx`, pushing at most one
/// [`Operation::CreateFromInput`] onto `ops`. Returns true if a create was emitted,
/// so the caller can suppress the transfer-from-input rule.
pub fn detect_create_from_input(tx: &L1Transaction, ops: &mut Vec<Operation>) -> bool {
    let Some(initial_owner) = tx.to else { return false };
    let Some(utf8) = tx.utf8_input() else { return false };
    let Some(uri) = DataUri::parse(utf8) else { return false };

    let content_uri = utf8.to_owned();
    let esip6 = uri.has_esip6_rule();
    let token_params = parse_token_params(&uri);

    ops.push(Operation::CreateFromInput {
        tx_hash: tx.hash,
        from: tx.from,
        initial_owner,
        content_uri,
        esip6,
        esip7_compressed: false,
        token_params,
    });
    true
}

/// Opportunistically parses a `{"p": ..., "op": "deploy"|"mint", ...}` JSON payload
/// out of an empty-mediatype data URI. Any parse failure yields `None` without
/// affecting the enclosing create.
fn parse_token_params(uri: &DataUri) -> Option<TokenParams> {
    if !uri.media_type.is_empty() {
        return None;
    }
    token_params::parse(&uri.payload)
}

fn percent_decode(s: &str) -> Vec<u8> {
    s.as_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_empty_data_uri() {
        let uri = DataUri::parse("data:,").unwrap();
        assert!(uri.media_type.is_empty());
        assert!(uri.payload.is_empty());
    }

    #[test]
    fn parses_mediatype_with_params() {
        let uri = DataUri::parse("data:image/png;rule=esip6;base64,aGVsbG8=").unwrap();
        assert_eq!(uri.media_type, "image");
        assert_eq!(uri.mime_subtype, "png");
        assert!(uri.is_base64);
        assert!(uri.has_esip6_rule());
        assert_eq!(&uri.payload[..], b"hello");
    }

    #[test]
    fn rejects_malformed_base64_payload() {
        assert!(DataUri::parse("data:image/png;base64,not valid base64!!").is_none());
    }

    #[test]
    fn rejects_missing_comma() {
        assert!(DataUri::parse("data:image/png").is_none());
    }

    #[test]
    fn rejects_non_data_scheme() {
        assert!(DataUri::parse("https://example.com").is_none());
    }
}
