//! Voting-power oracle for token-weighted proposals.

use agora_types::{TokenAddress, WalletAddress};
use rand::Rng;

/// Supplies the voting power a wallet holds in a given token.
///
/// A production implementation queries the token balance; the ledger treats
/// the result as opaque non-negative weight and rejects zero itself.
pub trait VotingPowerOracle: Send + Sync {
    fn get_weight(&self, token_address: &TokenAddress, wallet: &WalletAddress) -> f64;
}

/// Stand-in oracle: uniform random weight in `[100, 30000)`.
pub struct RandomOracle;

impl VotingPowerOracle for RandomOracle {
    fn get_weight(&self, _token_address: &TokenAddress, _wallet: &WalletAddress) -> f64 {
        rand::thread_rng().gen_range(100.0..30_000.0)
    }
}

/// Deterministic oracle returning a fixed weight; for tests and local runs.
pub struct FixedOracle(pub f64);

impl VotingPowerOracle for FixedOracle {
    fn get_weight(&self, _token_address: &TokenAddress, _wallet: &WalletAddress) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_oracle_stays_in_range() {
        let oracle = RandomOracle;
        let token = WalletAddress::from_bytes(&[0xAA; 20]);
        let wallet = WalletAddress::from_bytes(&[0xBB; 20]);
        for _ in 0..50 {
            let w = oracle.get_weight(&token, &wallet);
            assert!((100.0..30_000.0).contains(&w));
        }
    }
}
