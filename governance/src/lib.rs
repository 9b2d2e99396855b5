//! Proposal lifecycle and vote ledger for the Agora voting platform.
//!
//! Lifecycle: Scheduled → Active → Closed, derived lazily from wall-clock
//! time. There is no background sweeper; every status-dependent read or
//! write sweeps first, so callers always observe current statuses.
//!
//! Key invariants: one vote per wallet per proposal, statuses never move
//! backwards, weighted votes carry oracle-supplied positive voting power.

pub mod engine;
pub mod error;
pub mod ledger;
pub mod oracle;

pub use engine::{ProposalDraft, ProposalEngine, DEFAULT_PROPOSAL_DURATION_SECS};
pub use error::GovernanceError;
pub use ledger::{Tally, VoteLedger, Winner};
pub use oracle::{FixedOracle, RandomOracle, VotingPowerOracle};
