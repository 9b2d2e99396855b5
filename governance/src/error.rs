use agora_store::StoreError;
use agora_types::{ProposalId, Timestamp, WalletAddress};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("proposal {0} not found")]
    ProposalNotFound(ProposalId),

    #[error("proposal {0} is closed")]
    ProposalClosed(ProposalId),

    #[error("proposal {0} has not started yet")]
    ProposalNotStarted(ProposalId),

    #[error("wallet {0} has already voted on this proposal")]
    DuplicateVote(WalletAddress),

    #[error("wallet {wallet} holds no voting power in token {token}")]
    ZeroVotingPower {
        token: WalletAddress,
        wallet: WalletAddress,
    },

    #[error("invalid start time: created at {created}, start at {start}")]
    InvalidStartTime { created: Timestamp, start: Timestamp },

    #[error("proposal duration must be at least one second")]
    InvalidDuration,

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
