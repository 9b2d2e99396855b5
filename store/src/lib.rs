//! Abstract storage traits for the Agora voting platform.
//!
//! Every storage backend (in-memory for tests and reference deployments, a
//! relational store in production) implements these traits. The rest of the
//! codebase depends only on the traits.
//!
//! The traits deliberately include the atomic check-then-write primitives
//! the domain needs (`insert_vote`, `sweep_statuses`, `upsert_user`): each
//! call must be a single critical section in the backend, so concurrent
//! callers can never both pass a uniqueness check before either write lands.

pub mod error;
pub mod proposal;
pub mod user;
pub mod vote;

pub use error::StoreError;
pub use proposal::{Proposal, ProposalKind, ProposalStore};
pub use user::{User, UserStore};
pub use vote::{Vote, VoteStore};
