//! Serde helpers for the Ethereum JSON-RPC hex-quantity convention, used by
//! the `genesis` CLI subcommand's allocation dump.

/// (De)serializes a `u64` as a `0x`-prefixed hex string, the quantity
/// encoding JSON-RPC responses use for numeric fields.
pub mod hex_u64 {
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes `value` as `"0x..."`.
    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{value:#x}"))
    }

    /// Deserializes a `"0x..."` or plain-decimal string into a `u64`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let digits = raw.strip_prefix("0x").unwrap_or(&raw);
        u64::from_str_radix(digits, 16).map_err(serde::de::Error::custom)
    }
}

/// (De)serializes an `alloy_primitives::U256` as a `0x`-prefixed hex string.
pub mod hex_u256 {
    use alloy_primitives::U256;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes `value` as `"0x..."`.
    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{value:#x}"))
    }

    /// Deserializes a `"0x..."` hex string into a `U256`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<U256>().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Serialize, Deserialize)]
    struct Quantity(#[serde(with = "hex_u64")] u64);

    #[derive(Serialize, Deserialize)]
    struct Balance(#[serde(with = "hex_u256")] U256);

    #[test]
    fn hex_u64_round_trips() {
        let json = serde_json::to_string(&Quantity(4096)).unwrap();
        assert_eq!(json, "\"0x1000\"");
        let back: Quantity = serde_json::from_str(&json).unwrap();
        assert_eq!(back.0, 4096);
    }

    #[test]
    fn hex_u256_round_trips() {
        let value = U256::from(123_456_789_u64);
        let json = serde_json::to_string(&Balance(value)).unwrap();
        let back: Balance = serde_json::from_str(&json).unwrap();
        assert_eq!(back.0, value);
    }
}
