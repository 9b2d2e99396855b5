//! Wallet address type: `0x`-prefixed, 20-byte hex.
//!
//! The same textual address has many valid casings (checksum casing mixes
//! upper and lower hex), so equality and hashing are case-insensitive while
//! the original casing is preserved for display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Hex length of the address payload (20 bytes).
const HEX_LEN: usize = 40;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid wallet address: {0}")]
    Invalid(String),
}

/// A wallet address, always `0x` + 40 hex characters.
///
/// Two addresses are equal if they name the same account, regardless of
/// checksum casing.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

/// Token contract addresses share the wallet address format.
pub type TokenAddress = WalletAddress;

impl WalletAddress {
    /// Parse and validate an address string.
    pub fn parse(raw: impl Into<String>) -> Result<Self, AddressError> {
        let s = raw.into();
        let hex_part = s
            .strip_prefix("0x")
            .ok_or_else(|| AddressError::Invalid(s.clone()))?;
        if hex_part.len() != HEX_LEN || !hex_part.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AddressError::Invalid(s));
        }
        Ok(Self(s))
    }

    /// Construct from raw 20 address bytes, lowercase hex.
    pub fn from_bytes(bytes: &[u8; 20]) -> Self {
        Self(format!("0x{}", hex::encode(bytes)))
    }

    /// The raw address string, casing as originally supplied.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 40 hex characters after the `0x` prefix.
    pub fn hex_part(&self) -> &str {
        &self.0[2..]
    }

    /// The 20 address bytes.
    pub fn to_bytes(&self) -> [u8; 20] {
        let mut out = [0u8; 20];
        // Validated at construction, decode cannot fail.
        if let Ok(decoded) = hex::decode(self.hex_part()) {
            out.copy_from_slice(&decoded);
        }
        out
    }
}

impl PartialEq for WalletAddress {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for WalletAddress {}

impl Hash for WalletAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.0.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const ADDR: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";

    #[test]
    fn parse_valid() {
        let a = WalletAddress::parse(ADDR).unwrap();
        assert_eq!(a.as_str(), ADDR);
    }

    #[test]
    fn parse_rejects_missing_prefix() {
        assert!(WalletAddress::parse(&ADDR[2..]).is_err());
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!(WalletAddress::parse("0x1234").is_err());
        assert!(WalletAddress::parse(format!("{ADDR}ab")).is_err());
    }

    #[test]
    fn parse_rejects_non_hex() {
        assert!(WalletAddress::parse("0xZZ6916095ca1df60bB79Ce92cE3Ea74c37c5d359").is_err());
    }

    #[test]
    fn equality_ignores_casing() {
        let mixed = WalletAddress::parse(ADDR).unwrap();
        let lower = WalletAddress::parse(ADDR.to_lowercase()).unwrap();
        assert_eq!(mixed, lower);
    }

    #[test]
    fn hash_matches_equality() {
        let mut map = HashMap::new();
        map.insert(WalletAddress::parse(ADDR).unwrap(), 1u32);
        let lower = WalletAddress::parse(ADDR.to_lowercase()).unwrap();
        assert_eq!(map.get(&lower), Some(&1));
    }

    #[test]
    fn bytes_roundtrip() {
        let a = WalletAddress::parse(ADDR).unwrap();
        let b = WalletAddress::from_bytes(&a.to_bytes());
        assert_eq!(a, b);
    }
}
