use agora_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("session secret must not be empty")]
    EmptySecret,

    #[error("token encoding error: {0}")]
    Token(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
