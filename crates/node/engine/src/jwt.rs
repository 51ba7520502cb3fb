//! Loads the Engine API's shared JWT secret.

use alloy_rpc_types_engine::JwtSecret;

use crate::EngineError;

/// Parses a 64-hex-character (32-byte) JWT secret, tolerating an optional
/// `0x` prefix.
pub fn parse_secret(raw: &str) -> Result<JwtSecret, EngineError> {
    let trimmed = raw.trim().trim_start_matches("0x");
    JwtSecret::from_hex(trimmed).map_err(|_| EngineError::InvalidJwtSecret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_0x_prefixed_secret() {
        let hex = "0x".to_owned() + &"ab".repeat(32);
        assert!(parse_secret(&hex).is_ok());
    }

    #[test]
    fn rejects_a_short_secret() {
        assert!(parse_secret("abcd").is_err());
    }
}
