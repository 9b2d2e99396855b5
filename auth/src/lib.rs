//! Session issuance for the Agora voting platform.
//!
//! A client proves wallet ownership by signing a server-issued nonce; the
//! issuer recovers the signer, compares it to the claimed address and mints
//! a time-bounded HS256 credential. Credentials are self-contained: the
//! server verifies signature and expiry without any session table. A User
//! row is still upserted per login, purely for audit.

pub mod error;
pub mod session;

pub use error::AuthError;
pub use session::{Claims, SessionIssuer, DEFAULT_TOKEN_DURATION_SECS};
