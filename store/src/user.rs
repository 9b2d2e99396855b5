//! User audit records and their storage trait.

use crate::StoreError;
use agora_types::{Timestamp, WalletAddress};
use serde::{Deserialize, Serialize};

/// Audit record of the most recent session issued to a wallet.
///
/// Purely an observability side-channel: session tokens are verified by
/// their own signature and never checked against this table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    /// The wallet address (unique key, one row per address).
    pub wallet_address: WalletAddress,
    /// The most recently issued session token.
    pub last_token: String,
    /// When that token expires.
    pub expires_at: Timestamp,
}

/// Trait for user audit storage.
pub trait UserStore: Send + Sync {
    /// Insert or overwrite the record for `user.wallet_address`.
    ///
    /// Atomic: there is never more than one row per address.
    fn upsert_user(&self, user: &User) -> Result<(), StoreError>;

    fn get_user(&self, address: &WalletAddress) -> Result<User, StoreError>;

    fn user_count(&self) -> Result<u64, StoreError>;
}
