//! Proposal lifecycle engine — creation, status sweeps, read access.

use crate::error::GovernanceError;
use agora_store::{Proposal, ProposalKind, ProposalStore};
use agora_types::{ProposalId, ProposalStatus, Timestamp, WalletAddress};
use std::sync::Arc;
use tracing::{debug, info};

/// Default voting window when the caller gives none: one day.
pub const DEFAULT_PROPOSAL_DURATION_SECS: u64 = 86_400;

/// Input for creating a proposal.
pub struct ProposalDraft {
    pub title: String,
    pub description: String,
    pub proposer: WalletAddress,
    /// When voting opens. Defaults to creation time; must not lie in the
    /// past.
    pub start_at: Option<Timestamp>,
    /// Voting window length in seconds. Defaults to one day.
    pub duration_secs: Option<u64>,
    pub kind: ProposalKind,
}

/// Manages proposals through their Scheduled → Active → Closed lifecycle.
pub struct ProposalEngine {
    store: Arc<dyn ProposalStore>,
}

impl ProposalEngine {
    pub fn new(store: Arc<dyn ProposalStore>) -> Self {
        Self { store }
    }

    /// Create and persist a proposal.
    ///
    /// `created_at = now`; the effective start is the given `start_at` or
    /// `now`; `end_at = start + duration`. The initial status is derived
    /// from the window, so a future-start proposal is stored Scheduled.
    pub fn create(
        &self,
        draft: ProposalDraft,
        now: Timestamp,
    ) -> Result<Proposal, GovernanceError> {
        let created_at = now;
        if let Some(start) = draft.start_at {
            if start < created_at {
                return Err(GovernanceError::InvalidStartTime {
                    created: created_at,
                    start,
                });
            }
        }
        let start_at = draft.start_at.unwrap_or(created_at);

        let duration = draft
            .duration_secs
            .unwrap_or(DEFAULT_PROPOSAL_DURATION_SECS);
        if duration == 0 {
            return Err(GovernanceError::InvalidDuration);
        }
        let end_at = start_at.add_secs(duration);

        let proposal = Proposal {
            id: ProposalId::generate(),
            title: draft.title,
            description: draft.description,
            proposer: draft.proposer,
            created_at,
            start_at,
            end_at,
            status: ProposalStatus::at(start_at, end_at, now),
            kind: draft.kind,
        };
        self.store.insert_proposal(&proposal)?;

        info!(
            id = %proposal.id,
            proposer = %proposal.proposer,
            status = %proposal.status,
            end_at = %proposal.end_at,
            "proposal created"
        );
        Ok(proposal)
    }

    /// Advance stale statuses to their time-derived values.
    ///
    /// Must run before any read or write that depends on current status;
    /// expiry is entirely caller-driven. Idempotent.
    pub fn sweep_expired(&self, now: Timestamp) -> Result<(), GovernanceError> {
        for (id, status) in self.store.sweep_statuses(now)? {
            debug!(%id, %status, "proposal status advanced");
        }
        Ok(())
    }

    /// Fetch one proposal with a fresh status.
    pub fn get(&self, id: &ProposalId, now: Timestamp) -> Result<Proposal, GovernanceError> {
        self.sweep_expired(now)?;
        self.store.get_proposal(id).map_err(|e| match e {
            agora_store::StoreError::NotFound(_) => GovernanceError::ProposalNotFound(id.clone()),
            other => other.into(),
        })
    }

    /// All proposals with fresh statuses. Order is unspecified but stable
    /// within a call.
    pub fn list(&self, now: Timestamp) -> Result<Vec<Proposal>, GovernanceError> {
        self.sweep_expired(now)?;
        Ok(self.store.list_proposals()?)
    }
}
