//! Personal-message signing and signer recovery.
//!
//! Messages are hashed with the `"\x19Ethereum Signed Message:\n" + len`
//! prefix (EIP-191), signed with secp256k1 ECDSA, and carried as 65 bytes
//! `r || s || v` where `v` is 0/1 or the legacy 27/28.

use crate::address::derive_address;
use crate::error::CryptoError;
use crate::hash::keccak256_multi;
use agora_types::WalletAddress;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};

/// Byte length of a recoverable signature: 64-byte `r || s` plus recovery id.
pub const SIGNATURE_LEN: usize = 65;

/// Hash a message with the personal-message prefix.
pub fn personal_message_hash(message: &str) -> [u8; 32] {
    let prefix = format!("\x19Ethereum Signed Message:\n{}", message.len());
    keccak256_multi(&[prefix.as_bytes(), message.as_bytes()])
}

/// Sign a personal message, returning the 65-byte recoverable signature.
pub fn sign_personal(message: &str, key: &SigningKey) -> Result<[u8; SIGNATURE_LEN], CryptoError> {
    let prehash = personal_message_hash(message);
    let (sig, recid) = key
        .sign_prehash_recoverable(&prehash)
        .map_err(|_| CryptoError::InvalidPrivateKey)?;

    let mut out = [0u8; SIGNATURE_LEN];
    out[..64].copy_from_slice(&sig.to_bytes());
    out[64] = recid.to_byte() + 27;
    Ok(out)
}

/// Recover the signing address from a personal message + signature pair.
///
/// Fails with `InvalidSignature` on any malformed input; never panics.
pub fn recover_signer(message: &str, signature: &[u8]) -> Result<WalletAddress, CryptoError> {
    if signature.len() != SIGNATURE_LEN {
        return Err(CryptoError::InvalidSignature);
    }

    let v = signature[64];
    let recid_byte = if v >= 27 { v - 27 } else { v };
    let recid = RecoveryId::from_byte(recid_byte).ok_or(CryptoError::InvalidSignature)?;
    let sig =
        Signature::from_slice(&signature[..64]).map_err(|_| CryptoError::InvalidSignature)?;

    let prehash = personal_message_hash(message);
    let key = VerifyingKey::recover_from_prehash(&prehash, &sig, recid)
        .map_err(|_| CryptoError::InvalidSignature)?;

    Ok(derive_address(&key))
}
