//! Vote entity and its storage trait.

use crate::StoreError;
use agora_types::{ProposalId, Timestamp, VoteId, VoteOption, WalletAddress};
use serde::{Deserialize, Serialize};

/// A recorded vote.
///
/// `weight` is `Some` exactly when the proposal is token-weighted; simple
/// votes count as one each.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Vote {
    pub id: VoteId,
    pub proposal_id: ProposalId,
    pub voter: WalletAddress,
    pub option: VoteOption,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    pub cast_at: Timestamp,
}

impl Vote {
    /// This vote's contribution to a tally.
    pub fn tally_weight(&self) -> f64 {
        self.weight.unwrap_or(1.0)
    }
}

/// Trait for vote storage operations.
pub trait VoteStore: Send + Sync {
    /// Record a vote.
    ///
    /// Atomic check-then-insert: fails with `StoreError::Duplicate` if a
    /// vote for `(proposal_id, voter)` already exists, with no window in
    /// which two concurrent callers can both pass the check.
    fn insert_vote(&self, vote: &Vote) -> Result<(), StoreError>;

    /// All votes on a proposal, unfiltered order.
    fn votes_for(&self, proposal_id: &ProposalId) -> Result<Vec<Vote>, StoreError>;

    fn vote_count(&self) -> Result<u64, StoreError>;
}
