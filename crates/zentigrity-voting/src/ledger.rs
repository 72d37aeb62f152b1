use crate::types::{LedgerSnapshot, Proposal, ProposalTally, VoteOutcome};
use crate::{Result, VotingError};
use std::collections::HashMap;
use tracing::{debug, info};
use zentigrity_types::ProposalId;

/// Quadratic-voting credit ledger.
///
/// Allocates a fixed credit budget across a set of proposals: casting `n`
/// votes on one proposal costs `n²` credits. The ledger is open until
/// [`finalize`](Self::finalize) locks it exactly once.
///
/// Invariant: `credits + Σ votes[p]²` equals the configured budget at all
/// times, and `credits` never goes negative (the cost check happens before
/// the commit, so no rollback is ever needed).
#[derive(Debug, Clone)]
pub struct VotingLedger {
    credit_budget: u32,
    credits: u32,
    votes: HashMap<ProposalId, u32>,
    submitted: bool,
    proposals: Vec<Proposal>,
}

impl VotingLedger {
    pub fn new(credit_budget: u32) -> Self {
        Self {
            credit_budget,
            credits: credit_budget,
            votes: HashMap::new(),
            submitted: false,
            proposals: Vec::new(),
        }
    }

    /// Rebuild a ledger from a persisted snapshot.
    ///
    /// The snapshot is taken as-is: a finalized snapshot stays finalized,
    /// so a process restart cannot be used to resubmit.
    pub fn from_snapshot(credit_budget: u32, snapshot: LedgerSnapshot) -> Self {
        Self {
            credit_budget,
            credits: snapshot.credits,
            votes: snapshot.votes,
            submitted: snapshot.submitted,
            proposals: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            credits: self.credits,
            votes: self.votes.clone(),
            submitted: self.submitted,
        }
    }

    /// Replace the proposal set wholesale.
    ///
    /// Idempotent full replace, not a merge; callers repopulate from the
    /// current approved-bid set whenever it changes.
    pub fn load_proposals(&mut self, proposals: Vec<Proposal>) {
        debug!(count = proposals.len(), "Proposal set replaced");
        self.proposals = proposals;
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    /// Request a vote-count change for one proposal.
    ///
    /// Computes the quadratic cost difference `new² − old²` and commits it
    /// only if the remaining budget covers it. Rejected requests leave the
    /// ledger untouched and report why through the outcome.
    pub fn cast_vote(&mut self, proposal_id: &ProposalId, new_votes: u32) -> VoteOutcome {
        if self.submitted {
            debug!(
                proposal_id = %proposal_id,
                "Vote change ignored, ledger finalized"
            );
            return VoteOutcome::Finalized;
        }

        let old_votes = self.votes.get(proposal_id).copied().unwrap_or(0);
        let old_cost = old_votes * old_votes;
        let new_cost = new_votes * new_votes;

        if new_cost > old_cost {
            let required = new_cost - old_cost;
            if required > self.credits {
                debug!(
                    proposal_id = %proposal_id,
                    old_votes = old_votes,
                    new_votes = new_votes,
                    required = required,
                    available = self.credits,
                    "Vote change rejected, insufficient credits"
                );
                return VoteOutcome::InsufficientCredits {
                    required,
                    available: self.credits,
                };
            }
            self.credits -= required;
        } else {
            self.credits += old_cost - new_cost;
        }

        self.votes.insert(proposal_id.clone(), new_votes);

        info!(
            proposal_id = %proposal_id,
            old_votes = old_votes,
            new_votes = new_votes,
            credits_remaining = self.credits,
            "Vote allocation updated"
        );

        VoteOutcome::Applied {
            credits_remaining: self.credits,
        }
    }

    /// Restore the initial state. Valid only while the ledger is open.
    pub fn reset(&mut self) -> Result<()> {
        if self.submitted {
            return Err(VotingError::AlreadyFinalized);
        }

        self.credits = self.credit_budget;
        self.votes.clear();

        info!(credit_budget = self.credit_budget, "Ledger reset");
        Ok(())
    }

    /// Lock the allocation permanently.
    pub fn finalize(&mut self) -> Result<()> {
        if self.submitted {
            return Err(VotingError::AlreadyFinalized);
        }

        self.submitted = true;

        info!(
            credits_spent = self.spent(),
            credits_remaining = self.credits,
            proposals_voted = self.votes.values().filter(|v| **v > 0).count(),
            "🗳️ Ledger finalized"
        );
        Ok(())
    }

    /// Per-proposal allocation rows for the results view, largest
    /// allocation first.
    pub fn tally(&self) -> Vec<ProposalTally> {
        let mut rows: Vec<ProposalTally> = self
            .votes
            .iter()
            .map(|(proposal_id, votes)| ProposalTally {
                proposal_id: proposal_id.clone(),
                votes: *votes,
                cost: votes * votes,
            })
            .collect();
        rows.sort_by(|a, b| b.votes.cmp(&a.votes).then_with(|| a.proposal_id.as_str().cmp(b.proposal_id.as_str())));
        rows
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    pub fn credit_budget(&self) -> u32 {
        self.credit_budget
    }

    pub fn votes_for(&self, proposal_id: &ProposalId) -> u32 {
        self.votes.get(proposal_id).copied().unwrap_or(0)
    }

    pub fn votes(&self) -> &HashMap<ProposalId, u32> {
        &self.votes
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Credits currently allocated: `Σ votes[p]²`.
    pub fn spent(&self) -> u32 {
        self.votes.values().map(|v| v * v).sum()
    }
}
