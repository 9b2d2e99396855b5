//! Vote ledger — records votes and tallies results.

use crate::error::GovernanceError;
use crate::oracle::VotingPowerOracle;
use agora_store::{Proposal, ProposalStore, StoreError, Vote, VoteStore};
use agora_types::{ProposalId, ProposalStatus, Timestamp, VoteId, VoteOption, WalletAddress};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of a tally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Yes,
    No,
    /// Both sides tied with at least one vote.
    Draw,
    /// No votes at all.
    Invalid,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => write!(f, "yes"),
            Self::No => write!(f, "no"),
            Self::Draw => write!(f, "draw"),
            Self::Invalid => write!(f, "invalid"),
        }
    }
}

/// Aggregated result for one proposal.
///
/// For simple proposals the totals are vote counts; for token-weighted
/// proposals they are summed voting power.
#[derive(Clone, Debug, Serialize)]
pub struct Tally {
    pub proposal_id: ProposalId,
    pub yes: f64,
    pub no: f64,
    pub total: f64,
    pub winner: Winner,
}

impl Tally {
    fn from_votes(proposal_id: ProposalId, votes: &[Vote]) -> Self {
        let mut yes = 0.0;
        let mut no = 0.0;
        for vote in votes {
            match vote.option {
                VoteOption::Yes => yes += vote.tally_weight(),
                VoteOption::No => no += vote.tally_weight(),
            }
        }

        let winner = if yes > no {
            Winner::Yes
        } else if no > yes {
            Winner::No
        } else if yes > 0.0 {
            Winner::Draw
        } else {
            Winner::Invalid
        };

        Self {
            proposal_id,
            yes,
            no,
            total: yes + no,
            winner,
        }
    }
}

/// Records votes under one-vote-per-wallet-per-proposal and tallies them.
pub struct VoteLedger {
    proposals: Arc<dyn ProposalStore>,
    votes: Arc<dyn VoteStore>,
    oracle: Arc<dyn VotingPowerOracle>,
}

impl VoteLedger {
    pub fn new(
        proposals: Arc<dyn ProposalStore>,
        votes: Arc<dyn VoteStore>,
        oracle: Arc<dyn VotingPowerOracle>,
    ) -> Self {
        Self {
            proposals,
            votes,
            oracle,
        }
    }

    fn swept_proposal(
        &self,
        proposal_id: &ProposalId,
        now: Timestamp,
    ) -> Result<Proposal, GovernanceError> {
        for (id, status) in self.proposals.sweep_statuses(now)? {
            debug!(%id, %status, "proposal status advanced");
        }
        self.proposals.get_proposal(proposal_id).map_err(|e| match e {
            StoreError::NotFound(_) => GovernanceError::ProposalNotFound(proposal_id.clone()),
            other => other.into(),
        })
    }

    /// Cast a vote on an active proposal.
    ///
    /// Sweeps first, so an expired proposal can never accept a late vote.
    /// For token-weighted proposals the oracle is queried before anything
    /// is persisted; zero power rejects the vote outright.
    pub fn cast(
        &self,
        proposal_id: &ProposalId,
        voter: &WalletAddress,
        option: VoteOption,
        now: Timestamp,
    ) -> Result<Vote, GovernanceError> {
        let proposal = self.swept_proposal(proposal_id, now)?;

        match proposal.status {
            ProposalStatus::Closed => {
                return Err(GovernanceError::ProposalClosed(proposal_id.clone()))
            }
            ProposalStatus::Scheduled => {
                return Err(GovernanceError::ProposalNotStarted(proposal_id.clone()))
            }
            ProposalStatus::Active => {}
        }

        let weight = match proposal.token_address() {
            Some(token) => {
                let w = self.oracle.get_weight(token, voter);
                if w == 0.0 {
                    return Err(GovernanceError::ZeroVotingPower {
                        token: token.clone(),
                        wallet: voter.clone(),
                    });
                }
                Some(w)
            }
            None => None,
        };

        let vote = Vote {
            id: VoteId::generate(),
            proposal_id: proposal_id.clone(),
            voter: voter.clone(),
            option,
            weight,
            cast_at: now,
        };
        self.votes.insert_vote(&vote).map_err(|e| match e {
            StoreError::Duplicate(_) => GovernanceError::DuplicateVote(voter.clone()),
            other => other.into(),
        })?;

        info!(proposal = %proposal_id, voter = %voter, %option, "vote cast");
        Ok(vote)
    }

    /// All votes on a proposal, unfiltered order.
    pub fn list_votes(
        &self,
        proposal_id: &ProposalId,
        now: Timestamp,
    ) -> Result<Vec<Vote>, GovernanceError> {
        self.swept_proposal(proposal_id, now)?;
        Ok(self.votes.votes_for(proposal_id)?)
    }

    /// Aggregate the votes on a proposal.
    pub fn tally(
        &self,
        proposal_id: &ProposalId,
        now: Timestamp,
    ) -> Result<Tally, GovernanceError> {
        self.swept_proposal(proposal_id, now)?;
        let votes = self.votes.votes_for(proposal_id)?;
        Ok(Tally::from_votes(proposal_id.clone(), &votes))
    }
}
