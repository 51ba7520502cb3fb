//! Opportunistic JSON parsing of token-deploy/mint payloads out of
//! empty-mediatype data URIs, e.g. `data:,{"p":"erc-20","op":"mint",...}`.

use ethd_protocol::TokenParams;
use serde_json::Value;

/// Parses `payload` as a token-params JSON object. Any structural mismatch —
/// invalid JSON, missing `p`/`op`/`tick`, wrong value types — yields `None`
/// rather than propagating an error; the enclosing create is unaffected.
pub fn parse(payload: &[u8]) -> Option<TokenParams> {
    let value: Value = serde_json::from_slice(payload).ok()?;
    let object = value.as_object()?;

    let protocol = object.get("p")?.as_str()?.to_owned();
    let operation = object.get("op")?.as_str()?.to_owned();
    let tick = object.get("tick")?.as_str()?.to_owned();
    let max = string_field(object, "max");
    let lim = string_field(object, "lim");
    let amt = string_field(object, "amt");

    Some(TokenParams { protocol, operation, tick, max, lim, amt })
}

fn string_field(object: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_deploy_payload() {
        let params = parse(br#"{"p":"erc-20","op":"deploy","tick":"eths","max":"21000000","lim":"1000"}"#)
            .unwrap();
        assert_eq!(params.protocol, "erc-20");
        assert_eq!(params.operation, "deploy");
        assert_eq!(params.tick, "eths");
        assert_eq!(params.max.as_deref(), Some("21000000"));
        assert_eq!(params.lim.as_deref(), Some("1000"));
        assert_eq!(params.amt, None);
    }

    #[test]
    fn parses_a_mint_payload() {
        let params = parse(br#"{"p":"erc-20","op":"mint","tick":"eths","amt":"1000"}"#).unwrap();
        assert_eq!(params.operation, "mint");
        assert_eq!(params.amt.as_deref(), Some("1000"));
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(parse(b"not json").is_none());
    }

    #[test]
    fn rejects_missing_required_fields() {
        assert!(parse(br#"{"p":"erc-20"}"#).is_none());
    }

    #[test]
    fn rejects_non_object_json() {
        assert!(parse(b"[1,2,3]").is_none());
    }
}
