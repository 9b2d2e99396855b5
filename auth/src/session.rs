//! Credential minting and validation.

use crate::error::AuthError;
use agora_crypto::{addresses_equal, recover_signer};
use agora_store::{User, UserStore};
use agora_types::{Timestamp, WalletAddress};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Default credential lifetime: 60 minutes. No refresh mechanism.
pub const DEFAULT_TOKEN_DURATION_SECS: u64 = 3600;

/// Payload embedded in a session credential.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated wallet.
    pub wallet_address: WalletAddress,
    /// The nonce the wallet signed to log in.
    pub signed_message: String,
    /// The signature presented at login, hex-encoded.
    pub signature: String,
    /// Expiry as Unix seconds.
    pub exp: u64,
}

/// Mints and validates session credentials for authenticated wallets.
pub struct SessionIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_duration_secs: u64,
    users: Arc<dyn UserStore>,
}

impl SessionIssuer {
    /// Create an issuer with an explicit store handle.
    ///
    /// Fails if `secret` is empty; HS256 with a guessable key is worse
    /// than a startup error.
    pub fn new(
        secret: &str,
        token_duration_secs: u64,
        users: Arc<dyn UserStore>,
    ) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::EmptySecret);
        }
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_duration_secs,
            users,
        })
    }

    /// Verify a signed nonce and issue a credential for the wallet.
    ///
    /// The recovered signer must match `claimed_address` (casing ignored);
    /// anything else is `Unauthorized`. On success the User audit row is
    /// upserted with the fresh token.
    pub fn login(
        &self,
        claimed_address: &WalletAddress,
        signed_message: &str,
        signature_hex: &str,
        now: Timestamp,
    ) -> Result<String, AuthError> {
        let signature = hex::decode(signature_hex.strip_prefix("0x").unwrap_or(signature_hex))
            .map_err(|_| AuthError::InvalidSignature)?;
        let recovered = recover_signer(signed_message, &signature)
            .map_err(|_| AuthError::InvalidSignature)?;

        if !addresses_equal(claimed_address, &recovered) {
            return Err(AuthError::Unauthorized);
        }

        let expires_at = now.add_secs(self.token_duration_secs);
        let claims = Claims {
            wallet_address: claimed_address.clone(),
            signed_message: signed_message.to_string(),
            signature: signature_hex.to_string(),
            exp: expires_at.as_secs(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Token(e.to_string()))?;

        self.users.upsert_user(&User {
            wallet_address: claimed_address.clone(),
            last_token: token.clone(),
            expires_at,
        })?;

        info!(wallet = %claimed_address, expires_at = %expires_at, "session issued");
        Ok(token)
    }

    /// Validate a presented credential and return the wallet it binds.
    ///
    /// Bad signature, malformed token or `now` past expiry all map to
    /// `Unauthorized`; the audit table is never consulted.
    pub fn authenticate(&self, token: &str, now: Timestamp) -> Result<WalletAddress, AuthError> {
        // Expiry is checked against the caller's clock below, not the
        // library's system clock.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AuthError::Unauthorized)?;

        if now.as_secs() > data.claims.exp {
            return Err(AuthError::Unauthorized);
        }
        Ok(data.claims.wallet_address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_crypto::{address_of, generate_signing_key, issue_nonce, sign_personal};
    use agora_store::UserStore;
    use agora_store_mem::MemStore;

    fn issuer(store: Arc<MemStore>) -> SessionIssuer {
        SessionIssuer::new("unit-test-secret", DEFAULT_TOKEN_DURATION_SECS, store).unwrap()
    }

    #[test]
    fn empty_secret_rejected() {
        assert!(matches!(
            SessionIssuer::new("", 60, Arc::new(MemStore::new())),
            Err(AuthError::EmptySecret)
        ));
    }

    #[test]
    fn login_roundtrip() {
        let store = Arc::new(MemStore::new());
        let issuer = issuer(store.clone());
        let key = generate_signing_key();
        let wallet = address_of(&key);
        let nonce = issue_nonce();
        let sig = hex::encode(sign_personal(&nonce, &key).unwrap());

        let now = Timestamp::new(1_000);
        let token = issuer.login(&wallet, &nonce, &sig, now).unwrap();

        let authed = issuer.authenticate(&token, now.add_secs(10)).unwrap();
        assert_eq!(authed, wallet);

        // Audit row recorded.
        let user = store.get_user(&wallet).unwrap();
        assert_eq!(user.last_token, token);
        assert_eq!(user.expires_at, now.add_secs(DEFAULT_TOKEN_DURATION_SECS));
    }

    #[test]
    fn login_accepts_lowercased_claimed_address() {
        let issuer = issuer(Arc::new(MemStore::new()));
        let key = generate_signing_key();
        let wallet = address_of(&key);
        let lower = WalletAddress::parse(wallet.as_str().to_lowercase()).unwrap();
        let sig = hex::encode(sign_personal("nonce", &key).unwrap());

        assert!(issuer.login(&lower, "nonce", &sig, Timestamp::new(0)).is_ok());
    }

    #[test]
    fn login_rejects_wrong_signer() {
        let issuer = issuer(Arc::new(MemStore::new()));
        let key = generate_signing_key();
        let other_wallet = address_of(&generate_signing_key());
        let sig = hex::encode(sign_personal("nonce", &key).unwrap());

        assert!(matches!(
            issuer.login(&other_wallet, "nonce", &sig, Timestamp::new(0)),
            Err(AuthError::Unauthorized)
        ));
    }

    #[test]
    fn login_rejects_signature_over_different_nonce() {
        let issuer = issuer(Arc::new(MemStore::new()));
        let key = generate_signing_key();
        let wallet = address_of(&key);
        let sig = hex::encode(sign_personal("nonce-a", &key).unwrap());

        assert!(matches!(
            issuer.login(&wallet, "nonce-b", &sig, Timestamp::new(0)),
            Err(AuthError::Unauthorized)
        ));
    }

    #[test]
    fn login_rejects_malformed_signature() {
        let issuer = issuer(Arc::new(MemStore::new()));
        let wallet = address_of(&generate_signing_key());

        assert!(matches!(
            issuer.login(&wallet, "nonce", "zz-not-hex", Timestamp::new(0)),
            Err(AuthError::InvalidSignature)
        ));
        assert!(matches!(
            issuer.login(&wallet, "nonce", "deadbeef", Timestamp::new(0)),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn authenticate_rejects_expired_token() {
        let issuer = issuer(Arc::new(MemStore::new()));
        let key = generate_signing_key();
        let wallet = address_of(&key);
        let sig = hex::encode(sign_personal("nonce", &key).unwrap());

        let now = Timestamp::new(1_000);
        let token = issuer.login(&wallet, "nonce", &sig, now).unwrap();

        let just_before = now.add_secs(DEFAULT_TOKEN_DURATION_SECS);
        assert!(issuer.authenticate(&token, just_before).is_ok());

        let after = just_before.add_secs(1);
        assert!(matches!(
            issuer.authenticate(&token, after),
            Err(AuthError::Unauthorized)
        ));
    }

    #[test]
    fn authenticate_rejects_garbage_and_tampering() {
        let issuer = issuer(Arc::new(MemStore::new()));
        assert!(issuer.authenticate("not-a-token", Timestamp::new(0)).is_err());

        let key = generate_signing_key();
        let wallet = address_of(&key);
        let sig = hex::encode(sign_personal("nonce", &key).unwrap());
        let token = issuer.login(&wallet, "nonce", &sig, Timestamp::new(0)).unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        assert!(issuer.authenticate(&tampered, Timestamp::new(0)).is_err());
    }

    #[test]
    fn authenticate_rejects_token_from_other_secret() {
        let store: Arc<MemStore> = Arc::new(MemStore::new());
        let issuer_a = SessionIssuer::new("secret-a", 60, store.clone()).unwrap();
        let issuer_b = SessionIssuer::new("secret-b", 60, store).unwrap();

        let key = generate_signing_key();
        let wallet = address_of(&key);
        let sig = hex::encode(sign_personal("nonce", &key).unwrap());
        let token = issuer_a.login(&wallet, "nonce", &sig, Timestamp::new(0)).unwrap();

        assert!(matches!(
            issuer_b.authenticate(&token, Timestamp::new(0)),
            Err(AuthError::Unauthorized)
        ));
    }

    #[test]
    fn repeated_logins_keep_one_audit_row() {
        let store = Arc::new(MemStore::new());
        let issuer = issuer(store.clone());
        let key = generate_signing_key();
        let wallet = address_of(&key);
        let sig = hex::encode(sign_personal("nonce", &key).unwrap());

        issuer.login(&wallet, "nonce", &sig, Timestamp::new(0)).unwrap();
        issuer.login(&wallet, "nonce", &sig, Timestamp::new(100)).unwrap();

        assert_eq!(store.user_count().unwrap(), 1);
    }
}
