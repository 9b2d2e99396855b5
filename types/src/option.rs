//! The two ballot options.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A voter's choice on a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteOption {
    Yes,
    No,
}

impl fmt::Display for VoteOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => write!(f, "yes"),
            Self::No => write!(f, "no"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_lowercase() {
        assert_eq!(serde_json::to_string(&VoteOption::Yes).unwrap(), "\"yes\"");
        let v: VoteOption = serde_json::from_str("\"no\"").unwrap();
        assert_eq!(v, VoteOption::No);
    }
}
