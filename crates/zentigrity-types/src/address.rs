use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 20-byte chain wallet address, rendered as 0x-prefixed hex.
///
/// The escrow contract the surrounding application talks to lives on an
/// EVM chain, so addresses follow that format. The core never validates an
/// address against the chain, only its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress([u8; 20]);

impl WalletAddress {
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn from_hex(address: &str) -> Result<Self> {
        let stripped = address.strip_prefix("0x").unwrap_or(address);
        let decoded = hex::decode(stripped)?;
        let bytes: [u8; 20] = decoded
            .as_slice()
            .try_into()
            .map_err(|_| anyhow::anyhow!("Invalid address length: {}", decoded.len()))?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<WalletAddress> for String {
    fn from(value: WalletAddress) -> Self {
        value.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let addr = WalletAddress::from_hex("0x38b09fF7F662D02402397653766ed795F9FD8f25").unwrap();
        assert_eq!(addr.to_hex(), "0x38b09ff7f662d02402397653766ed795f9fd8f25");

        // Prefix is optional on input
        let bare = WalletAddress::from_hex("38b09ff7f662d02402397653766ed795f9fd8f25").unwrap();
        assert_eq!(addr, bare);
    }

    #[test]
    fn test_invalid_addresses() {
        assert!(WalletAddress::from_hex("0x1234").is_err());
        assert!(WalletAddress::from_hex("not-an-address").is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let addr = WalletAddress::from_bytes([0xab; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "ab".repeat(20)));

        let back: WalletAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
