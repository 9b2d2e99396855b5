//! secp256k1 key helpers for the signing CLI and tests.

use crate::address::derive_address;
use crate::error::CryptoError;
use agora_types::WalletAddress;
use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;

/// Generate a fresh random signing key.
pub fn generate_signing_key() -> SigningKey {
    SigningKey::random(&mut OsRng)
}

/// Parse a signing key from a hex-encoded 32-byte scalar (`0x` optional).
pub fn signing_key_from_hex(raw: &str) -> Result<SigningKey, CryptoError> {
    let hex_part = raw.strip_prefix("0x").unwrap_or(raw);
    let bytes = hex::decode(hex_part).map_err(|_| CryptoError::InvalidPrivateKey)?;
    SigningKey::from_slice(&bytes).map_err(|_| CryptoError::InvalidPrivateKey)
}

/// The wallet address controlled by a signing key.
pub fn address_of(key: &SigningKey) -> WalletAddress {
    derive_address(key.verifying_key())
}
