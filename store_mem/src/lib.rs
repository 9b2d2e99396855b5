//! In-memory storage backend.
//!
//! Thread-safe `Mutex<HashMap>` collections, one per entity. Each trait
//! method runs under a single lock acquisition, which is what makes the
//! check-then-write primitives (`insert_vote`, `sweep_statuses`,
//! `upsert_user`) atomic under arbitrary interleaving of parallel callers.
//!
//! This is the reference backend; a relational backend implements the same
//! traits with transactions in place of the mutexes.

use agora_store::{Proposal, ProposalStore, StoreError, User, UserStore, Vote, VoteStore};
use agora_types::{ProposalId, ProposalStatus, Timestamp, WalletAddress};
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory user + proposal + vote store.
pub struct MemStore {
    users: Mutex<HashMap<WalletAddress, User>>,
    proposals: Mutex<HashMap<ProposalId, Proposal>>,
    // Keyed by (proposal, voter) so uniqueness is structural.
    votes: Mutex<HashMap<(ProposalId, WalletAddress), Vote>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            proposals: Mutex::new(HashMap::new()),
            votes: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for MemStore {
    fn upsert_user(&self, user: &User) -> Result<(), StoreError> {
        self.users
            .lock()
            .unwrap()
            .insert(user.wallet_address.clone(), user.clone());
        Ok(())
    }

    fn get_user(&self, address: &WalletAddress) -> Result<User, StoreError> {
        self.users
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(address.to_string()))
    }

    fn user_count(&self) -> Result<u64, StoreError> {
        Ok(self.users.lock().unwrap().len() as u64)
    }
}

impl ProposalStore for MemStore {
    fn insert_proposal(&self, proposal: &Proposal) -> Result<(), StoreError> {
        let mut proposals = self.proposals.lock().unwrap();
        if proposals.contains_key(&proposal.id) {
            return Err(StoreError::Duplicate(proposal.id.to_string()));
        }
        proposals.insert(proposal.id.clone(), proposal.clone());
        Ok(())
    }

    fn get_proposal(&self, id: &ProposalId) -> Result<Proposal, StoreError> {
        self.proposals
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn list_proposals(&self) -> Result<Vec<Proposal>, StoreError> {
        Ok(self.proposals.lock().unwrap().values().cloned().collect())
    }

    fn sweep_statuses(
        &self,
        now: Timestamp,
    ) -> Result<Vec<(ProposalId, ProposalStatus)>, StoreError> {
        let mut proposals = self.proposals.lock().unwrap();
        let mut transitions = Vec::new();
        for proposal in proposals.values_mut() {
            let next = proposal.status_at(now);
            if next != proposal.status {
                proposal.status = next;
                transitions.push((proposal.id.clone(), next));
            }
        }
        Ok(transitions)
    }
}

impl VoteStore for MemStore {
    fn insert_vote(&self, vote: &Vote) -> Result<(), StoreError> {
        let mut votes = self.votes.lock().unwrap();
        let key = (vote.proposal_id.clone(), vote.voter.clone());
        if votes.contains_key(&key) {
            return Err(StoreError::Duplicate(format!(
                "{}/{}",
                vote.proposal_id, vote.voter
            )));
        }
        votes.insert(key, vote.clone());
        Ok(())
    }

    fn votes_for(&self, proposal_id: &ProposalId) -> Result<Vec<Vote>, StoreError> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .values()
            .filter(|v| &v.proposal_id == proposal_id)
            .cloned()
            .collect())
    }

    fn vote_count(&self) -> Result<u64, StoreError> {
        Ok(self.votes.lock().unwrap().len() as u64)
    }
}
