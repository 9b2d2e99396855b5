//! Proposal entity and its storage trait.

use crate::StoreError;
use agora_types::{ProposalId, ProposalStatus, Timestamp, TokenAddress, WalletAddress};
use serde::{Deserialize, Serialize};

/// Which tallying scheme a proposal uses.
///
/// Simple proposals count one per vote; token-weighted proposals sum the
/// voting power queried from the token at `token_address`. One entity and
/// one lifecycle serve both.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProposalKind {
    Simple,
    TokenWeighted { token_address: TokenAddress },
}

/// A proposal put to vote.
///
/// Immutable once created, except for `status`, which only ever advances
/// (Scheduled → Active → Closed). Never deleted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub title: String,
    pub description: String,
    pub proposer: WalletAddress,
    pub created_at: Timestamp,
    /// Voting window: `[start_at, end_at)`. Invariant:
    /// `created_at <= start_at < end_at`.
    pub start_at: Timestamp,
    pub end_at: Timestamp,
    pub status: ProposalStatus,
    #[serde(flatten)]
    pub kind: ProposalKind,
}

impl Proposal {
    /// The status this proposal should carry at `now`, never moving
    /// backwards from the stored status.
    pub fn status_at(&self, now: Timestamp) -> ProposalStatus {
        self.status
            .max(ProposalStatus::at(self.start_at, self.end_at, now))
    }

    /// Token address for weighted proposals, `None` for simple ones.
    pub fn token_address(&self) -> Option<&TokenAddress> {
        match &self.kind {
            ProposalKind::Simple => None,
            ProposalKind::TokenWeighted { token_address } => Some(token_address),
        }
    }
}

/// Trait for proposal storage operations.
pub trait ProposalStore: Send + Sync {
    fn insert_proposal(&self, proposal: &Proposal) -> Result<(), StoreError>;

    fn get_proposal(&self, id: &ProposalId) -> Result<Proposal, StoreError>;

    /// All proposals; order is unspecified but stable within a call.
    fn list_proposals(&self) -> Result<Vec<Proposal>, StoreError>;

    /// Advance every stored status to `status_at(now)` in one atomic scan.
    ///
    /// Returns the transitions applied. Idempotent: a second call at the
    /// same `now` returns no transitions.
    fn sweep_statuses(
        &self,
        now: Timestamp,
    ) -> Result<Vec<(ProposalId, ProposalStatus)>, StoreError>;
}
