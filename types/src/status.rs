//! Proposal lifecycle status.
//!
//! A proposal moves Scheduled → Active → Closed based purely on wall-clock
//! time relative to its voting window. Transitions are monotonic: a stored
//! status never moves backwards.

use crate::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a proposal.
///
/// Ordering follows the lifecycle, so `stored.max(derived)` advances a
/// status without ever reverting it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    /// Voting window has not opened yet.
    Scheduled,
    /// Voting is open: `start_at <= now < end_at`.
    Active,
    /// Voting window has ended.
    Closed,
}

impl ProposalStatus {
    /// Status of a voting window `[start_at, end_at)` at time `now`.
    pub fn at(start_at: Timestamp, end_at: Timestamp, now: Timestamp) -> Self {
        if now >= end_at {
            Self::Closed
        } else if now >= start_at {
            Self::Active
        } else {
            Self::Scheduled
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scheduled => write!(f, "scheduled"),
            Self::Active => write!(f, "active"),
            Self::Closed => write!(f, "closed"),
        }
    }
}
