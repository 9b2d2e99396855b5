//! Cryptographic primitives for the Agora voting platform.
//!
//! Covers everything the identity layer needs:
//! - Keccak-256 hashing
//! - personal-message signing and signer recovery (secp256k1 ECDSA)
//! - checksum-cased wallet addresses and address comparison
//! - login nonce generation

pub mod address;
pub mod error;
pub mod hash;
pub mod keys;
pub mod nonce;
pub mod sign;

pub use address::{addresses_equal, derive_address, to_checksum_address};
pub use error::CryptoError;
pub use hash::{keccak256, keccak256_multi};
pub use keys::{address_of, generate_signing_key, signing_key_from_hex};
pub use nonce::issue_nonce;
pub use sign::{personal_message_hash, recover_signer, sign_personal};
