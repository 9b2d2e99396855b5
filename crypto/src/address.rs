//! Checksum-cased wallet addresses (EIP-55).
//!
//! An address is the last 20 bytes of Keccak-256 over the uncompressed
//! public key. Checksum casing uppercases each hex letter whose matching
//! nibble of keccak256(lowercase_hex) is >= 8, so the same account has many
//! valid textual casings.

use crate::keccak256;
use agora_types::WalletAddress;
use k256::ecdsa::VerifyingKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;

/// Derive a checksum-cased wallet address from a public key.
pub fn derive_address(public_key: &VerifyingKey) -> WalletAddress {
    let point = public_key.to_encoded_point(false);
    // Skip the 0x04 uncompressed-point tag.
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash[12..]);
    to_checksum_address(&WalletAddress::from_bytes(&bytes))
}

/// Re-case an address with its canonical checksum casing.
pub fn to_checksum_address(address: &WalletAddress) -> WalletAddress {
    let lower = address.hex_part().to_ascii_lowercase();
    let hash = keccak256(lower.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0F
        };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    // Input was a valid address, so the re-cased form is too.
    WalletAddress::parse(out).expect("checksum casing preserves address shape")
}

/// Whether two addresses name the same account, regardless of casing.
pub fn addresses_equal(a: &WalletAddress, b: &WalletAddress) -> bool {
    to_checksum_address(a) == to_checksum_address(b)
}
