//! Login nonce generation.
//!
//! Nonces are 128-bit random challenges the client signs to prove key
//! ownership. They are issued stateless: the server keeps no record, so a
//! nonce stays signable until the resulting session token expires.

/// Produce a fresh random nonce, hex-encoded (32 chars).
pub fn issue_nonce() -> String {
    let bytes: [u8; 16] = rand::random();
    hex::encode(bytes)
}
