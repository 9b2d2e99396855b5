//! HTTP API server for the Agora voting platform.
//!
//! Exposes every core operation as a JSON endpoint:
//! - nonce issuance and signed-nonce login
//! - proposal creation and queries
//! - vote casting and result tallies
//!
//! Writes require a bearer credential; the handlers extract the wallet
//! address from the verified token and pass it into the core, which never
//! touches transport headers.

pub mod config;
pub mod error;
pub mod handlers;
pub mod server;

pub use config::ServerConfig;
pub use error::RpcError;
pub use server::{AppState, RpcServer};
