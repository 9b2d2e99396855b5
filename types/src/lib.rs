//! Fundamental types for the Agora voting platform.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: wallet addresses, timestamps, entity ids, vote options and
//! proposal statuses.

pub mod address;
pub mod id;
pub mod option;
pub mod status;
pub mod time;

pub use address::{AddressError, TokenAddress, WalletAddress};
pub use id::{ProposalId, VoteId};
pub use option::VoteOption;
pub use status::ProposalStatus;
pub use time::Timestamp;
