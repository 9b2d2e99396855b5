//! Opaque entity identifiers: 128 random bits, hex-encoded (32 chars).

use serde::{Deserialize, Serialize};
use std::fmt;

fn fresh_hex() -> String {
    let bytes: [u8; 16] = rand::random();
    hex::encode(bytes)
}

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh, unique id.
            pub fn generate() -> Self {
                Self(fresh_hex())
            }

            /// Wrap an existing id string (e.g. from a request path).
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Unique id of a proposal.
    ProposalId
);
entity_id!(
    /// Unique id of a recorded vote.
    VoteId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = ProposalId::generate();
        let b = ProposalId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn generated_ids_are_32_hex_chars() {
        let id = VoteId::generate();
        assert_eq!(id.as_str().len(), 32);
        assert!(id.as_str().bytes().all(|b| b.is_ascii_hexdigit()));
    }
}
